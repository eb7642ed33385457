//! Error hierarchy for pgframe-arrow.
//!
//! Follows the "canonical error struct" pattern: callers classify errors
//! through `is_xxx()` methods rather than matching on an internal `ErrorKind`.

use thiserror::Error;

/// Root error type for pgframe-arrow crate.
///
/// Captures every failure mode of PostgreSQL to Arrow conversion (read
/// direction) and Arrow to PostgreSQL parameter extraction (write direction).
///
/// # Example
///
/// ```rust,ignore
/// use pgframe_arrow::ArrowConversionError;
///
/// fn handle_error(err: ArrowConversionError) {
///     if err.is_unsupported_type() {
///         eprintln!("cast the column to a supported type, e.g. ::text");
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct ArrowConversionError {
    kind: ErrorKind,
}

/// Internal error classification.
///
/// This enum is `pub(crate)` to allow adding variants without breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub(crate) enum ErrorKind {
    /// A PostgreSQL or Arrow type with no mapping on the other side.
    #[error("unsupported type: {name}")]
    UnsupportedType { name: String },

    /// Column count mismatch between expected and actual.
    #[error("schema mismatch: expected {expected} columns, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    /// Value conversion failure for a specific column.
    #[error("value conversion failed for column '{column}': {message}")]
    ValueConversion { column: String, message: String },

    /// Decimal value exceeds Arrow Decimal128 capacity.
    #[error("decimal overflow: precision {precision}, scale {scale}")]
    DecimalOverflow { precision: u8, scale: i8 },

    /// Error from Arrow library operations.
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    /// Error from sqlx while decoding a row value.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid precision value for DECIMAL type.
    #[error("invalid precision: {0}")]
    InvalidPrecision(String),

    /// Invalid scale value for DECIMAL type.
    #[error("invalid scale: {0}")]
    InvalidScale(String),
}

impl ArrowConversionError {
    // ═══════════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════════

    /// Create error for an unsupported type.
    #[must_use]
    pub fn unsupported_type(name: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UnsupportedType { name: name.into() },
        }
    }

    /// Create error for schema mismatch.
    #[must_use]
    pub const fn schema_mismatch(expected: usize, actual: usize) -> Self {
        Self {
            kind: ErrorKind::SchemaMismatch { expected, actual },
        }
    }

    /// Create error for value conversion failure.
    #[must_use]
    pub fn value_conversion(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ValueConversion {
                column: column.into(),
                message: message.into(),
            },
        }
    }

    /// Create error for decimal overflow.
    #[must_use]
    pub const fn decimal_overflow(precision: u8, scale: i8) -> Self {
        Self {
            kind: ErrorKind::DecimalOverflow { precision, scale },
        }
    }

    /// Create error for invalid precision.
    #[must_use]
    pub fn invalid_precision(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidPrecision(message.into()),
        }
    }

    /// Create error for invalid scale.
    #[must_use]
    pub fn invalid_scale(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidScale(message.into()),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Predicate Methods (is_xxx)
    // ═══════════════════════════════════════════════════════════════════════

    /// Returns true if this is an unsupported type error.
    #[must_use]
    pub const fn is_unsupported_type(&self) -> bool {
        matches!(self.kind, ErrorKind::UnsupportedType { .. })
    }

    /// Returns true if this is a schema mismatch error.
    #[must_use]
    pub const fn is_schema_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::SchemaMismatch { .. })
    }

    /// Returns true if this is a value conversion error.
    #[must_use]
    pub const fn is_value_conversion(&self) -> bool {
        matches!(self.kind, ErrorKind::ValueConversion { .. })
    }

    /// Returns true if this is a decimal overflow error.
    #[must_use]
    pub const fn is_decimal_overflow(&self) -> bool {
        matches!(self.kind, ErrorKind::DecimalOverflow { .. })
    }

    /// Returns true if this is an Arrow library error.
    #[must_use]
    pub const fn is_arrow_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Arrow(_))
    }

    /// Returns true if this is a row decoding error.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode(_))
    }

    /// Returns true if this is an invalid precision error.
    #[must_use]
    pub const fn is_invalid_precision(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidPrecision(_))
    }

    /// Returns true if this is an invalid scale error.
    #[must_use]
    pub const fn is_invalid_scale(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidScale(_))
    }
}

impl From<sqlx::Error> for ArrowConversionError {
    fn from(err: sqlx::Error) -> Self {
        Self {
            kind: ErrorKind::Decode(err.to_string()),
        }
    }
}

impl From<arrow_schema::ArrowError> for ArrowConversionError {
    fn from(err: arrow_schema::ArrowError) -> Self {
        Self {
            kind: ErrorKind::Arrow(err),
        }
    }
}

/// Result type alias for Arrow conversion operations.
pub type Result<T> = std::result::Result<T, ArrowConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ArrowConversionError::unsupported_type("INTERVAL");
        assert!(err.is_unsupported_type());
        assert!(!err.is_schema_mismatch());
        assert!(err.to_string().contains("INTERVAL"));
    }

    #[test]
    fn test_schema_mismatch() {
        let err = ArrowConversionError::schema_mismatch(5, 3);
        assert!(err.is_schema_mismatch());
        assert!(err.to_string().contains("expected 5 columns, got 3"));
    }

    #[test]
    fn test_value_conversion() {
        let err = ArrowConversionError::value_conversion("price", "invalid numeric");
        assert!(err.is_value_conversion());
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_decimal_overflow() {
        let err = ArrowConversionError::decimal_overflow(38, 10);
        assert!(err.is_decimal_overflow());
        assert!(!err.is_value_conversion());
    }

    #[test]
    fn test_decode_from_sqlx() {
        let err = ArrowConversionError::from(sqlx::Error::ColumnIndexOutOfBounds { index: 4, len: 2 });
        assert!(err.is_decode_error());
        assert!(err.to_string().starts_with("decode error"));
    }

    #[test]
    fn test_arrow_error_from() {
        let err = ArrowConversionError::from(arrow_schema::ArrowError::SchemaError("bad".into()));
        assert!(err.is_arrow_error());
    }

    #[test]
    fn test_error_debug() {
        let err = ArrowConversionError::invalid_scale("scale 40 exceeds precision 38");
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("ArrowConversionError"));
        assert!(err.is_invalid_scale());
    }
}
