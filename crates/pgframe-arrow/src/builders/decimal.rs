//! Decimal128 builder with precision and scale validation.
//!
//! Handles PostgreSQL `NUMERIC` values with proper precision/scale handling
//! using Arrow Decimal128 arrays.

use std::sync::Arc;

use arrow_array::ArrayRef;
use arrow_array::builder::Decimal128Builder;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Decimal;

use crate::traits::builder::PgCompatibleBuilder;
use crate::traits::sealed::private::Sealed;
use crate::{ArrowConversionError, Result};

/// Largest precision representable by Arrow Decimal128.
pub const MAX_DECIMAL128_PRECISION: u8 = 38;

/// Validated decimal configuration.
///
/// Ensures precision and scale are valid at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalConfig {
    precision: u8,
    scale: i8,
}

impl DecimalConfig {
    /// Create a new decimal configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if precision is outside `1..=38` or scale is outside
    /// `0..=precision`.
    pub fn new(precision: u8, scale: i8) -> Result<Self> {
        if precision == 0 || precision > MAX_DECIMAL128_PRECISION {
            return Err(ArrowConversionError::invalid_precision(format!(
                "precision {precision} outside 1..={MAX_DECIMAL128_PRECISION}"
            )));
        }
        if scale < 0 || scale.unsigned_abs() > precision {
            return Err(ArrowConversionError::invalid_scale(format!(
                "scale {scale} outside 0..={precision}"
            )));
        }
        Ok(Self { precision, scale })
    }

    /// Returns the precision value.
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the scale value.
    #[must_use]
    pub const fn scale(&self) -> i8 {
        self.scale
    }

    /// Convert a decimal to its unscaled Decimal128 representation.
    ///
    /// Values with more fractional digits than `scale` are rounded with
    /// banker's rounding.
    ///
    /// # Errors
    ///
    /// Returns a decimal overflow error if the value needs more than
    /// `precision` digits.
    pub fn to_i128(&self, value: Decimal) -> Result<i128> {
        let overflow = || ArrowConversionError::decimal_overflow(self.precision, self.scale);
        let target = u32::from(self.scale.unsigned_abs());
        let rounded = value.round_dp(target);
        // round_dp never increases the scale
        let missing = target - rounded.scale();

        let unscaled = 10_i128
            .checked_pow(missing)
            .and_then(|factor| rounded.mantissa().checked_mul(factor))
            .ok_or_else(overflow)?;

        let limit = 10_i128.pow(u32::from(self.precision));
        if unscaled.unsigned_abs() >= limit.unsigned_abs() {
            return Err(overflow());
        }
        Ok(unscaled)
    }
}

/// Builder for Arrow Decimal128 arrays.
///
/// Maintains precision and scale configuration for `NUMERIC` handling.
#[derive(Debug)]
pub struct Decimal128BuilderWrapper {
    builder: Decimal128Builder,
    config: DecimalConfig,
    len: usize,
}

impl Decimal128BuilderWrapper {
    /// Create from validated config.
    #[must_use]
    pub fn from_config(capacity: usize, config: DecimalConfig) -> Self {
        let builder = Decimal128Builder::with_capacity(capacity).with_data_type(
            arrow_schema::DataType::Decimal128(config.precision(), config.scale()),
        );

        Self {
            builder,
            config,
            len: 0,
        }
    }

    /// Returns the decimal configuration.
    #[must_use]
    pub const fn config(&self) -> DecimalConfig {
        self.config
    }
}

impl Sealed for Decimal128BuilderWrapper {}

impl PgCompatibleBuilder for Decimal128BuilderWrapper {
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match row.try_get::<Option<Decimal>, _>(index)? {
            Some(value) => {
                let unscaled = self.config.to_i128(value)?;
                self.builder.append_value(unscaled);
                self.len += 1;
            }
            None => self.append_null(),
        }
        Ok(())
    }

    fn append_null(&mut self) {
        self.builder.append_null();
        self.len += 1;
    }

    fn finish(&mut self) -> ArrayRef {
        self.len = 0;
        Arc::new(self.builder.finish())
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use arrow_array::Array;
    use arrow_schema::DataType;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_decimal_config_valid() {
        let config = DecimalConfig::new(18, 2).unwrap();
        assert_eq!(config.precision(), 18);
        assert_eq!(config.scale(), 2);
    }

    #[test]
    fn test_decimal_config_invalid_precision() {
        assert!(DecimalConfig::new(0, 0).unwrap_err().is_invalid_precision());
        assert!(DecimalConfig::new(39, 2).unwrap_err().is_invalid_precision());
    }

    #[test]
    fn test_decimal_config_invalid_scale() {
        assert!(DecimalConfig::new(10, 11).unwrap_err().is_invalid_scale());
        assert!(DecimalConfig::new(10, -1).unwrap_err().is_invalid_scale());
    }

    #[test]
    fn test_to_i128_scales_up() {
        let config = DecimalConfig::new(38, 10).unwrap();
        assert_eq!(config.to_i128(dec("123.45")).unwrap(), 1_234_500_000_000);
        assert_eq!(config.to_i128(dec("-1")).unwrap(), -10_000_000_000);
        assert_eq!(config.to_i128(dec("0")).unwrap(), 0);
    }

    #[test]
    fn test_to_i128_rounds_extra_digits() {
        let config = DecimalConfig::new(10, 2).unwrap();
        assert_eq!(config.to_i128(dec("1.005")).unwrap(), 100);
        assert_eq!(config.to_i128(dec("1.015")).unwrap(), 102);
    }

    #[test]
    fn test_to_i128_overflow() {
        let config = DecimalConfig::new(4, 2).unwrap();
        assert_eq!(config.to_i128(dec("99.99")).unwrap(), 9999);
        assert!(config.to_i128(dec("100")).unwrap_err().is_decimal_overflow());
    }

    #[test]
    fn test_builder_data_type() {
        let config = DecimalConfig::new(38, 10).unwrap();
        let mut builder = Decimal128BuilderWrapper::from_config(4, config);
        builder.append_null();
        assert_eq!(builder.config(), config);

        let array = builder.finish();
        assert_eq!(array.data_type(), &DataType::Decimal128(38, 10));
        assert_eq!(array.null_count(), 1);
    }
}
