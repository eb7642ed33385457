//! PostgreSQL column types recognised by the converter.
//!
//! Types are identified by the name `sqlx` reports for a column's
//! [`PgTypeInfo`]. Several PostgreSQL types share one wire representation
//! and collapse into a single [`PgType`] (e.g. `VARCHAR`, `BPCHAR` and `NAME`
//! are all [`PgType::Text`]).

use sqlx::TypeInfo;
use sqlx::postgres::PgTypeInfo;

use crate::{ArrowConversionError, Result};

/// Precision used for `NUMERIC` columns read into Arrow `Decimal128`.
///
/// PostgreSQL does not report per-column precision in result metadata, so
/// every `NUMERIC` column is read at the widest Decimal128 precision.
pub const NUMERIC_PRECISION: u8 = 38;

/// Scale used for `NUMERIC` columns read into Arrow `Decimal128`.
///
/// Values with more fractional digits are rounded (banker's rounding). Tables
/// created by `arrow_type_to_pg` never declare a wider scale.
pub const NUMERIC_SCALE: i8 = 10;

/// A PostgreSQL type with a known Arrow representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PgType {
    /// `BOOL`
    Bool,
    /// `INT2` / `SMALLINT`
    Int2,
    /// `INT4` / `INTEGER`
    Int4,
    /// `INT8` / `BIGINT`
    Int8,
    /// `OID` (unsigned 32-bit, widened to Int64)
    Oid,
    /// `FLOAT4` / `REAL`
    Float4,
    /// `FLOAT8` / `DOUBLE PRECISION`
    Float8,
    /// `NUMERIC` / `DECIMAL`
    Numeric,
    /// `TEXT`, `VARCHAR`, `BPCHAR`, `NAME`, `CITEXT`
    Text,
    /// `UUID`
    Uuid,
    /// `JSON` / `JSONB`
    Json,
    /// `BYTEA`
    Bytea,
    /// `DATE`
    Date,
    /// `TIME` (without time zone)
    Time,
    /// `TIMESTAMP` (without time zone)
    Timestamp,
    /// `TIMESTAMPTZ`
    Timestamptz,
}

/// Coarse grouping of [`PgType`]s, mostly useful for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgTypeCategory {
    /// Booleans.
    Boolean,
    /// Integers and floating point numbers.
    Numeric,
    /// Arbitrary precision decimals.
    Decimal,
    /// Character data, including UUID and JSON rendered as text.
    String,
    /// Byte strings.
    Binary,
    /// Dates, times and timestamps.
    Temporal,
}

impl PgType {
    /// Resolve a type from the name `sqlx` reports for it.
    ///
    /// Matching is case-insensitive; extension types such as `citext` are
    /// reported in lower case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name.to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" => Self::Bool,
            "INT2" | "SMALLINT" => Self::Int2,
            "INT4" | "INT" | "INTEGER" => Self::Int4,
            "INT8" | "BIGINT" => Self::Int8,
            "OID" => Self::Oid,
            "FLOAT4" | "REAL" => Self::Float4,
            "FLOAT8" | "DOUBLE PRECISION" => Self::Float8,
            "NUMERIC" | "DECIMAL" => Self::Numeric,
            // sqlx displays bpchar as CHAR; the single-byte "char" is quoted
            "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" | "CITEXT" | "UNKNOWN" => Self::Text,
            "UUID" => Self::Uuid,
            "JSON" | "JSONB" => Self::Json,
            "BYTEA" => Self::Bytea,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "TIMESTAMPTZ" => Self::Timestamptz,
            _ => return None,
        };
        Some(ty)
    }

    /// Resolve a type from column metadata.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-type error for types without an Arrow mapping
    /// (arrays, ranges, intervals, composite and enum types, ...).
    pub fn from_type_info(info: &PgTypeInfo) -> Result<Self> {
        let name = info.name();
        Self::from_name(name).ok_or_else(|| ArrowConversionError::unsupported_type(name))
    }

    /// Returns the category of this type.
    #[must_use]
    pub const fn category(self) -> PgTypeCategory {
        match self {
            Self::Bool => PgTypeCategory::Boolean,
            Self::Int2 | Self::Int4 | Self::Int8 | Self::Oid | Self::Float4 | Self::Float8 => {
                PgTypeCategory::Numeric
            }
            Self::Numeric => PgTypeCategory::Decimal,
            Self::Text | Self::Uuid | Self::Json => PgTypeCategory::String,
            Self::Bytea => PgTypeCategory::Binary,
            Self::Date | Self::Time | Self::Timestamp | Self::Timestamptz => {
                PgTypeCategory::Temporal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_integers() {
        assert_eq!(PgType::from_name("INT2"), Some(PgType::Int2));
        assert_eq!(PgType::from_name("INT4"), Some(PgType::Int4));
        assert_eq!(PgType::from_name("INT8"), Some(PgType::Int8));
        assert_eq!(PgType::from_name("OID"), Some(PgType::Oid));
    }

    #[test]
    fn test_from_name_text_aliases() {
        for name in ["TEXT", "VARCHAR", "CHAR", "NAME", "citext"] {
            assert_eq!(PgType::from_name(name), Some(PgType::Text), "{name}");
        }
    }

    #[test]
    fn test_from_name_json_variants() {
        assert_eq!(PgType::from_name("JSON"), Some(PgType::Json));
        assert_eq!(PgType::from_name("JSONB"), Some(PgType::Json));
    }

    #[test]
    fn test_from_name_unsupported() {
        assert_eq!(PgType::from_name("INTERVAL"), None);
        assert_eq!(PgType::from_name("INT4[]"), None);
        assert_eq!(PgType::from_name("\"CHAR\""), None);
    }

    #[test]
    fn test_from_type_info() {
        let info = PgTypeInfo::with_name("TIMESTAMPTZ");
        assert_eq!(PgType::from_type_info(&info).unwrap(), PgType::Timestamptz);

        let err = PgType::from_type_info(&PgTypeInfo::with_name("tsvector")).unwrap_err();
        assert!(err.is_unsupported_type());
        assert!(err.to_string().contains("tsvector"));
    }

    #[test]
    fn test_category() {
        assert_eq!(PgType::Int4.category(), PgTypeCategory::Numeric);
        assert_eq!(PgType::Numeric.category(), PgTypeCategory::Decimal);
        assert_eq!(PgType::Uuid.category(), PgTypeCategory::String);
        assert_eq!(PgType::Bytea.category(), PgTypeCategory::Binary);
        assert_eq!(PgType::Date.category(), PgTypeCategory::Temporal);
        assert_eq!(PgType::Bool.category(), PgTypeCategory::Boolean);
    }
}
