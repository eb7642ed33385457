//! Arrow type mappings to and from PostgreSQL types.
//!
//! This module provides the authoritative mapping between PostgreSQL SQL
//! types and Apache Arrow types, in both directions.
//!
//! # Read Mapping (PostgreSQL → Arrow)
//!
//! | PostgreSQL | Arrow Type | Notes |
//! |------------|------------|-------|
//! | BOOL | Boolean | |
//! | INT2 | Int16 | |
//! | INT4 | Int32 | |
//! | INT8, OID | Int64 | OID is unsigned 32-bit |
//! | FLOAT4 | Float32 | |
//! | FLOAT8 | Float64 | |
//! | NUMERIC | Decimal128(38, 10) | Rounded to 10 fractional digits |
//! | TEXT/VARCHAR/BPCHAR/NAME | Utf8 | |
//! | UUID | Utf8 | Hyphenated form |
//! | JSON/JSONB | Utf8 | Serialised JSON |
//! | BYTEA | Binary | |
//! | DATE | Date32 | Days since epoch |
//! | TIME | Time64(Microsecond) | |
//! | TIMESTAMP | Timestamp(Microsecond, None) | |
//! | TIMESTAMPTZ | Timestamp(Microsecond, "UTC") | |
//!
//! # Write Mapping (Arrow → PostgreSQL DDL)
//!
//! See [`arrow_type_to_pg`].

use std::borrow::Cow;

use arrow_schema::{DataType, Field, TimeUnit};
use sqlx::Column;
use sqlx::postgres::PgColumn;

use super::postgres::{NUMERIC_PRECISION, NUMERIC_SCALE, PgType};
use crate::{ArrowConversionError, Result};

/// Time zone attached to Arrow timestamps read from `TIMESTAMPTZ` columns.
pub const UTC: &str = "UTC";

/// Convert a [`PgType`] to the Arrow `DataType` it is read into.
#[must_use]
pub fn pg_type_to_arrow(pg_type: PgType) -> DataType {
    match pg_type {
        PgType::Bool => DataType::Boolean,

        PgType::Int2 => DataType::Int16,
        PgType::Int4 => DataType::Int32,
        PgType::Int8 | PgType::Oid => DataType::Int64,

        PgType::Float4 => DataType::Float32,
        PgType::Float8 => DataType::Float64,

        PgType::Numeric => DataType::Decimal128(NUMERIC_PRECISION, NUMERIC_SCALE),

        PgType::Text | PgType::Uuid | PgType::Json => DataType::Utf8,
        PgType::Bytea => DataType::Binary,

        PgType::Date => DataType::Date32,
        PgType::Time => DataType::Time64(TimeUnit::Microsecond),
        PgType::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, None),
        PgType::Timestamptz => DataType::Timestamp(TimeUnit::Microsecond, Some(UTC.into())),
    }
}

/// Create an Arrow Field for a result column.
///
/// Result-set metadata carries no reliable nullability, so every field is
/// nullable.
#[must_use]
pub fn pg_field_to_arrow(name: &str, pg_type: PgType) -> Field {
    Field::new(name, pg_type_to_arrow(pg_type), true)
}

/// Render the PostgreSQL column type used to store an Arrow `DataType`.
///
/// | Arrow Type | PostgreSQL |
/// |------------|------------|
/// | Boolean | BOOLEAN |
/// | Int8, Int16, UInt8 | SMALLINT |
/// | Int32, UInt16 | INTEGER |
/// | Int64, UInt32 | BIGINT |
/// | Float16, Float32 | REAL |
/// | Float64 | DOUBLE PRECISION |
/// | Decimal128(p, s) | NUMERIC(p, s), scale capped at `NUMERIC_SCALE` |
/// | Utf8, LargeUtf8, Utf8View | TEXT |
/// | Binary, LargeBinary, BinaryView | BYTEA |
/// | Date32, Date64 | DATE |
/// | Time32, Time64 | TIME |
/// | Timestamp(_, None) | TIMESTAMP |
/// | Timestamp(_, Some(_)) | TIMESTAMPTZ |
///
/// # Errors
///
/// Returns an unsupported-type error for types with no lossless column type
/// (`UInt64`, nested types, intervals, ...).
pub fn arrow_type_to_pg(data_type: &DataType) -> Result<Cow<'static, str>> {
    let sql = match data_type {
        DataType::Boolean => "BOOLEAN",
        DataType::Int8 | DataType::Int16 | DataType::UInt8 => "SMALLINT",
        DataType::Int32 | DataType::UInt16 => "INTEGER",
        DataType::Int64 | DataType::UInt32 => "BIGINT",
        DataType::Float16 | DataType::Float32 => "REAL",
        DataType::Float64 => "DOUBLE PRECISION",
        DataType::Decimal128(precision, scale) => {
            if *scale < 0 {
                return Err(ArrowConversionError::invalid_scale(format!(
                    "negative scale {scale} has no NUMERIC equivalent"
                )));
            }
            // Reads come back at NUMERIC_SCALE; wider scales could not round-trip.
            let excess = (*scale - NUMERIC_SCALE).max(0).unsigned_abs();
            let scale = (*scale).min(NUMERIC_SCALE);
            let precision = precision.saturating_sub(excess).max(1);
            return Ok(Cow::Owned(format!("NUMERIC({precision}, {scale})")));
        }
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => "TEXT",
        DataType::Binary | DataType::LargeBinary | DataType::BinaryView => "BYTEA",
        DataType::Date32 | DataType::Date64 => "DATE",
        DataType::Time32(_) | DataType::Time64(_) => "TIME",
        DataType::Timestamp(_, None) => "TIMESTAMP",
        DataType::Timestamp(_, Some(_)) => "TIMESTAMPTZ",
        other => return Err(ArrowConversionError::unsupported_type(other.to_string())),
    };
    Ok(Cow::Borrowed(sql))
}

/// Extension trait for sqlx `PgColumn`.
///
/// Provides convenient conversion methods from column metadata to Arrow types.
pub trait ColumnExt {
    /// Resolve the column's [`PgType`].
    ///
    /// # Errors
    ///
    /// Returns an unsupported-type error if the column type has no mapping.
    fn pg_type(&self) -> Result<PgType>;

    /// Convert to Arrow Field.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-type error if the column type has no mapping.
    fn to_arrow_field(&self) -> Result<Field>;
}

impl ColumnExt for PgColumn {
    fn pg_type(&self) -> Result<PgType> {
        PgType::from_type_info(self.type_info())
    }

    fn to_arrow_field(&self) -> Result<Field> {
        Ok(pg_field_to_arrow(self.name(), self.pg_type()?))
    }
}
