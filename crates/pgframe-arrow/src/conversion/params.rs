//! Arrow to PostgreSQL parameter extraction.
//!
//! Reads one cell out of an Arrow array as a [`PgCell`] that can be bound
//! into an `INSERT` built with [`sqlx::QueryBuilder`]. The variant chosen for
//! each Arrow type matches the column type [`arrow_type_to_pg`] declares for
//! it, so bound values always fit the created table.
//!
//! [`arrow_type_to_pg`]: crate::arrow_type_to_pg

use std::fmt::Display;

use arrow_array::cast::AsArray;
use arrow_array::types::{
    Date32Type, Date64Type, Float16Type, Float32Type, Float64Type, Int8Type, Int16Type,
    Int32Type, Int64Type, Time32MillisecondType, Time32SecondType, Time64MicrosecondType,
    Time64NanosecondType, TimestampMicrosecondType, TimestampMillisecondType,
    TimestampNanosecondType, TimestampSecondType, UInt8Type, UInt16Type, UInt32Type,
};
use arrow_array::{Array, ArrowPrimitiveType, PrimitiveArray};
use arrow_schema::{DataType, TimeUnit};
use sqlx::Postgres;
use sqlx::query_builder::Separated;
use sqlx::types::Decimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::types::postgres::NUMERIC_SCALE;
use crate::{ArrowConversionError, Result};

/// A single nullable value ready to bind as a statement parameter.
///
/// Each variant carries `None` for SQL `NULL`, keeping the parameter's type
/// even when the value is missing.
#[derive(Debug, Clone, PartialEq)]
pub enum PgCell {
    /// `BOOLEAN`
    Bool(Option<bool>),
    /// `SMALLINT`
    Int2(Option<i16>),
    /// `INTEGER`
    Int4(Option<i32>),
    /// `BIGINT`
    Int8(Option<i64>),
    /// `REAL`
    Float4(Option<f32>),
    /// `DOUBLE PRECISION`
    Float8(Option<f64>),
    /// `NUMERIC`
    Numeric(Option<Decimal>),
    /// `TEXT`
    Text(Option<String>),
    /// `BYTEA`
    Bytea(Option<Vec<u8>>),
    /// `DATE`
    Date(Option<NaiveDate>),
    /// `TIME`
    Time(Option<NaiveTime>),
    /// `TIMESTAMP`
    Timestamp(Option<NaiveDateTime>),
    /// `TIMESTAMPTZ`
    Timestamptz(Option<DateTime<Utc>>),
}

impl PgCell {
    /// Returns true if the cell holds SQL `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        match self {
            Self::Bool(v) => v.is_none(),
            Self::Int2(v) => v.is_none(),
            Self::Int4(v) => v.is_none(),
            Self::Int8(v) => v.is_none(),
            Self::Float4(v) => v.is_none(),
            Self::Float8(v) => v.is_none(),
            Self::Numeric(v) => v.is_none(),
            Self::Text(v) => v.is_none(),
            Self::Bytea(v) => v.is_none(),
            Self::Date(v) => v.is_none(),
            Self::Time(v) => v.is_none(),
            Self::Timestamp(v) => v.is_none(),
            Self::Timestamptz(v) => v.is_none(),
        }
    }

    /// Bind this cell as the next parameter of a `VALUES` tuple.
    pub fn push_bind<Sep: Display>(self, values: &mut Separated<'_, '_, Postgres, Sep>) {
        match self {
            Self::Bool(v) => values.push_bind(v),
            Self::Int2(v) => values.push_bind(v),
            Self::Int4(v) => values.push_bind(v),
            Self::Int8(v) => values.push_bind(v),
            Self::Float4(v) => values.push_bind(v),
            Self::Float8(v) => values.push_bind(v),
            Self::Numeric(v) => values.push_bind(v),
            Self::Text(v) => values.push_bind(v),
            Self::Bytea(v) => values.push_bind(v),
            Self::Date(v) => values.push_bind(v),
            Self::Time(v) => values.push_bind(v),
            Self::Timestamp(v) => values.push_bind(v),
            Self::Timestamptz(v) => values.push_bind(v),
        };
    }
}

/// Read the cell at `row` from an Arrow array.
///
/// # Errors
///
/// Returns error if:
/// - The array type has no PostgreSQL column mapping
/// - A decimal does not fit `NUMERIC` parameter encoding
/// - A temporal value is outside the range PostgreSQL accepts
pub fn cell_at(array: &dyn Array, row: usize) -> Result<PgCell> {
    let cell = match array.data_type() {
        DataType::Boolean => {
            let a = array.as_boolean();
            PgCell::Bool(a.is_valid(row).then(|| a.value(row)))
        }

        DataType::Int8 => PgCell::Int2(primitive::<Int8Type>(array, row).map(i16::from)),
        DataType::Int16 => PgCell::Int2(primitive::<Int16Type>(array, row)),
        DataType::UInt8 => PgCell::Int2(primitive::<UInt8Type>(array, row).map(i16::from)),
        DataType::Int32 => PgCell::Int4(primitive::<Int32Type>(array, row)),
        DataType::UInt16 => PgCell::Int4(primitive::<UInt16Type>(array, row).map(i32::from)),
        DataType::Int64 => PgCell::Int8(primitive::<Int64Type>(array, row)),
        DataType::UInt32 => PgCell::Int8(primitive::<UInt32Type>(array, row).map(i64::from)),
        DataType::Float16 => {
            PgCell::Float4(primitive::<Float16Type>(array, row).map(|v| v.to_f32()))
        }
        DataType::Float32 => PgCell::Float4(primitive::<Float32Type>(array, row)),
        DataType::Float64 => PgCell::Float8(primitive::<Float64Type>(array, row)),

        DataType::Decimal128(_, scale) => {
            let a = array.as_primitive::<arrow_array::types::Decimal128Type>();
            let value = if a.is_valid(row) {
                Some(decimal_from_i128(a.value(row), *scale)?)
            } else {
                None
            };
            PgCell::Numeric(value)
        }

        DataType::Utf8 => {
            let a = array.as_string::<i32>();
            PgCell::Text(a.is_valid(row).then(|| a.value(row).to_owned()))
        }
        DataType::LargeUtf8 => {
            let a = array.as_string::<i64>();
            PgCell::Text(a.is_valid(row).then(|| a.value(row).to_owned()))
        }
        DataType::Utf8View => {
            let a = array.as_string_view();
            PgCell::Text(a.is_valid(row).then(|| a.value(row).to_owned()))
        }

        DataType::Binary => {
            let a = array.as_binary::<i32>();
            PgCell::Bytea(a.is_valid(row).then(|| a.value(row).to_vec()))
        }
        DataType::LargeBinary => {
            let a = array.as_binary::<i64>();
            PgCell::Bytea(a.is_valid(row).then(|| a.value(row).to_vec()))
        }
        DataType::BinaryView => {
            let a = array.as_binary_view();
            PgCell::Bytea(a.is_valid(row).then(|| a.value(row).to_vec()))
        }

        DataType::Date32 => PgCell::Date(temporal(
            array.as_primitive::<Date32Type>(),
            row,
            PrimitiveArray::value_as_date,
        )?),
        DataType::Date64 => PgCell::Date(temporal(
            array.as_primitive::<Date64Type>(),
            row,
            PrimitiveArray::value_as_date,
        )?),

        DataType::Time32(TimeUnit::Second) => PgCell::Time(temporal(
            array.as_primitive::<Time32SecondType>(),
            row,
            PrimitiveArray::value_as_time,
        )?),
        DataType::Time32(TimeUnit::Millisecond) => PgCell::Time(temporal(
            array.as_primitive::<Time32MillisecondType>(),
            row,
            PrimitiveArray::value_as_time,
        )?),
        DataType::Time64(TimeUnit::Microsecond) => PgCell::Time(temporal(
            array.as_primitive::<Time64MicrosecondType>(),
            row,
            PrimitiveArray::value_as_time,
        )?),
        DataType::Time64(TimeUnit::Nanosecond) => PgCell::Time(temporal(
            array.as_primitive::<Time64NanosecondType>(),
            row,
            PrimitiveArray::value_as_time,
        )?),

        DataType::Timestamp(unit, tz) => {
            let naive = match unit {
                TimeUnit::Second => temporal(
                    array.as_primitive::<TimestampSecondType>(),
                    row,
                    PrimitiveArray::value_as_datetime,
                )?,
                TimeUnit::Millisecond => temporal(
                    array.as_primitive::<TimestampMillisecondType>(),
                    row,
                    PrimitiveArray::value_as_datetime,
                )?,
                TimeUnit::Microsecond => temporal(
                    array.as_primitive::<TimestampMicrosecondType>(),
                    row,
                    PrimitiveArray::value_as_datetime,
                )?,
                TimeUnit::Nanosecond => temporal(
                    array.as_primitive::<TimestampNanosecondType>(),
                    row,
                    PrimitiveArray::value_as_datetime,
                )?,
            };
            // Arrow timestamps count from the UTC epoch whatever the zone tag.
            if tz.is_some() {
                PgCell::Timestamptz(naive.map(|ts| ts.and_utc()))
            } else {
                PgCell::Timestamp(naive)
            }
        }

        other => return Err(ArrowConversionError::unsupported_type(other.to_string())),
    };
    Ok(cell)
}

fn primitive<T: ArrowPrimitiveType>(array: &dyn Array, row: usize) -> Option<T::Native> {
    let a = array.as_primitive::<T>();
    a.is_valid(row).then(|| a.value(row))
}

fn temporal<T, V>(
    array: &PrimitiveArray<T>,
    row: usize,
    convert: impl Fn(&PrimitiveArray<T>, usize) -> Option<V>,
) -> Result<Option<V>>
where
    T: ArrowPrimitiveType,
{
    if array.is_null(row) {
        return Ok(None);
    }
    convert(array, row).map(Some).ok_or_else(|| {
        ArrowConversionError::value_conversion(
            array.data_type().to_string(),
            format!("value at row {row} is out of range"),
        )
    })
}

fn decimal_from_i128(value: i128, scale: i8) -> Result<Decimal> {
    let mut scale = u32::try_from(scale).map_err(|_| {
        ArrowConversionError::invalid_scale(format!(
            "negative scale {scale} has no NUMERIC equivalent"
        ))
    })?;

    // Decimal128(38, 10) reads carry up to 10 padding zeros that would push
    // large values past rust_decimal's 96-bit mantissa.
    let mut mantissa = value;
    while scale > 0 && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }

    if scale > u32::from(NUMERIC_SCALE.unsigned_abs()) {
        return Err(ArrowConversionError::value_conversion(
            "decimal",
            format!("{mantissa}e-{scale}: more than {NUMERIC_SCALE} fractional digits"),
        ));
    }

    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|e| {
        ArrowConversionError::value_conversion("decimal", format!("{mantissa}e-{scale}: {e}"))
    })
}
