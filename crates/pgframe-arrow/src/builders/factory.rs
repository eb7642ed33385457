//! Builder factory keyed by PostgreSQL column type.
//!
//! The factory ensures that builders are created with correct
//! configurations for each column, matching the fields produced by
//! [`pg_type_to_arrow`](crate::pg_type_to_arrow).

use arrow_array::types::{Float32Type, Float64Type, Int16Type, Int32Type, Int64Type};

use super::decimal::{Decimal128BuilderWrapper, DecimalConfig};
use super::primitive::{BooleanBuilderWrapper, OidBuilderWrapper, PrimitiveBuilderWrapper};
use super::string::{BinaryBuilderWrapper, StringBuilderWrapper, TextSource};
use super::temporal::{
    Date32BuilderWrapper, Time64MicrosecondBuilderWrapper, TimestampMicrosecondBuilderWrapper,
};
use crate::Result;
use crate::schema::mapping::ColumnSpec;
use crate::traits::builder::PgCompatibleBuilder;
use crate::types::postgres::{NUMERIC_PRECISION, NUMERIC_SCALE, PgType};

/// Factory for creating Arrow builders.
///
/// The factory ensures builders are created with appropriate capacity
/// and configuration for each column type.
#[derive(Debug, Clone)]
pub struct BuilderFactory {
    /// Number of rows to pre-allocate in each builder.
    capacity: usize,
    /// Bytes to pre-allocate for string data.
    string_capacity: usize,
    /// Bytes to pre-allocate for binary data.
    binary_capacity: usize,
}

impl BuilderFactory {
    /// Create a new factory with the specified row capacity.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            string_capacity: capacity.saturating_mul(32), // Estimate 32 bytes per string
            binary_capacity: capacity.saturating_mul(64), // Estimate 64 bytes per binary
        }
    }

    /// Set the string data capacity.
    #[must_use]
    pub const fn with_string_capacity(mut self, capacity: usize) -> Self {
        self.string_capacity = capacity;
        self
    }

    /// Set the binary data capacity.
    #[must_use]
    pub const fn with_binary_capacity(mut self, capacity: usize) -> Self {
        self.binary_capacity = capacity;
        self
    }

    /// Create a builder for the specified column type.
    ///
    /// # Errors
    ///
    /// Returns an error if the `NUMERIC` precision/scale constants are
    /// rejected by [`DecimalConfig`].
    pub fn create_builder(&self, pg_type: PgType) -> Result<Box<dyn PgCompatibleBuilder>> {
        let builder: Box<dyn PgCompatibleBuilder> = match pg_type {
            PgType::Bool => Box::new(BooleanBuilderWrapper::new(self.capacity)),
            PgType::Int2 => Box::new(PrimitiveBuilderWrapper::<Int16Type>::new(self.capacity)),
            PgType::Int4 => Box::new(PrimitiveBuilderWrapper::<Int32Type>::new(self.capacity)),
            PgType::Int8 => Box::new(PrimitiveBuilderWrapper::<Int64Type>::new(self.capacity)),
            PgType::Oid => Box::new(OidBuilderWrapper::new(self.capacity)),
            PgType::Float4 => Box::new(PrimitiveBuilderWrapper::<Float32Type>::new(self.capacity)),
            PgType::Float8 => Box::new(PrimitiveBuilderWrapper::<Float64Type>::new(self.capacity)),

            PgType::Numeric => {
                let config = DecimalConfig::new(NUMERIC_PRECISION, NUMERIC_SCALE)?;
                Box::new(Decimal128BuilderWrapper::from_config(self.capacity, config))
            }

            PgType::Text => self.string_builder(TextSource::Text),
            PgType::Uuid => self.string_builder(TextSource::Uuid),
            PgType::Json => self.string_builder(TextSource::Json),

            PgType::Bytea => Box::new(BinaryBuilderWrapper::new(
                self.capacity,
                self.binary_capacity,
            )),

            PgType::Date => Box::new(Date32BuilderWrapper::new(self.capacity)),
            PgType::Time => Box::new(Time64MicrosecondBuilderWrapper::new(self.capacity)),
            PgType::Timestamp => Box::new(TimestampMicrosecondBuilderWrapper::new(
                self.capacity,
                false,
            )),
            PgType::Timestamptz => Box::new(TimestampMicrosecondBuilderWrapper::new(
                self.capacity,
                true,
            )),
        };
        Ok(builder)
    }

    /// Create builders for all columns, in column order.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::create_builder`].
    pub fn create_builders_for_specs(
        &self,
        specs: &[ColumnSpec],
    ) -> Result<Vec<Box<dyn PgCompatibleBuilder>>> {
        specs
            .iter()
            .map(|spec| self.create_builder(spec.pg_type()))
            .collect()
    }

    fn string_builder(&self, source: TextSource) -> Box<dyn PgCompatibleBuilder> {
        Box::new(StringBuilderWrapper::new(
            self.capacity,
            self.string_capacity,
            source,
        ))
    }
}

impl Default for BuilderFactory {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use arrow_array::Array;

    use super::*;
    use crate::types::arrow::pg_type_to_arrow;

    const ALL_TYPES: [PgType; 16] = [
        PgType::Bool,
        PgType::Int2,
        PgType::Int4,
        PgType::Int8,
        PgType::Oid,
        PgType::Float4,
        PgType::Float8,
        PgType::Numeric,
        PgType::Text,
        PgType::Uuid,
        PgType::Json,
        PgType::Bytea,
        PgType::Date,
        PgType::Time,
        PgType::Timestamp,
        PgType::Timestamptz,
    ];

    #[test]
    fn test_factory_creation() {
        let factory = BuilderFactory::new(100);
        assert_eq!(factory.capacity, 100);
        assert_eq!(factory.string_capacity, 3200);
        assert_eq!(factory.binary_capacity, 6400);
    }

    #[test]
    fn test_factory_capacity_overrides() {
        let factory = BuilderFactory::default()
            .with_string_capacity(10)
            .with_binary_capacity(20);
        assert_eq!(factory.capacity, 1024);
        assert_eq!(factory.string_capacity, 10);
        assert_eq!(factory.binary_capacity, 20);
    }

    #[test]
    fn test_builder_types_match_field_mapping() {
        let factory = BuilderFactory::new(4);
        for pg_type in ALL_TYPES {
            let mut builder = factory.create_builder(pg_type).unwrap();
            builder.append_null();
            let array = builder.finish();
            assert_eq!(
                array.data_type(),
                &pg_type_to_arrow(pg_type),
                "builder for {pg_type:?}"
            );
            assert_eq!(array.len(), 1);
        }
    }

    #[test]
    fn test_create_builders_for_specs() {
        let specs = vec![
            ColumnSpec::new("id", PgType::Int4),
            ColumnSpec::new("name", PgType::Text),
        ];
        let builders = BuilderFactory::new(8)
            .create_builders_for_specs(&specs)
            .unwrap();
        assert_eq!(builders.len(), 2);
        assert!(builders.iter().all(|b| b.is_empty()));
    }
}
