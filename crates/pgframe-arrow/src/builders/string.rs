//! String and binary type builders.
//!
//! Implements builders for:
//! - `Utf8` (TEXT, VARCHAR, BPCHAR, NAME, CITEXT, UUID, JSON, JSONB)
//! - `Binary` (BYTEA)

use std::sync::Arc;

use arrow_array::ArrayRef;
use arrow_array::builder::{BinaryBuilder, StringBuilder};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::{JsonValue, Uuid};

use crate::Result;
use crate::traits::builder::PgCompatibleBuilder;
use crate::traits::sealed::FromPgValue;
use crate::traits::sealed::private::Sealed;

// ═══════════════════════════════════════════════════════════════════════════
// String Builders
// ═══════════════════════════════════════════════════════════════════════════

/// How a Utf8 column's cells are decoded from the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Character types; all share the UTF-8 text wire format.
    Text,
    /// `UUID`, rendered hyphenated.
    Uuid,
    /// `JSON`/`JSONB`, re-serialised compactly.
    Json,
}

/// Builder for Arrow Utf8 arrays.
#[derive(Debug)]
pub struct StringBuilderWrapper {
    builder: StringBuilder,
    source: TextSource,
    len: usize,
}

impl StringBuilderWrapper {
    /// Create a new string builder.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of strings to pre-allocate
    /// * `data_capacity` - Bytes to pre-allocate for string data
    /// * `source` - How cells are decoded
    #[must_use]
    pub fn new(capacity: usize, data_capacity: usize, source: TextSource) -> Self {
        Self {
            builder: StringBuilder::with_capacity(capacity, data_capacity),
            source,
            len: 0,
        }
    }

    fn decode(&self, row: &PgRow, index: usize) -> Result<Option<String>> {
        let value = match self.source {
            // VARCHAR, BPCHAR, NAME and extension text types decode identically
            // but only TEXT/VARCHAR pass sqlx's String compatibility check.
            TextSource::Text => row.try_get_unchecked::<Option<String>, _>(index)?,
            TextSource::Uuid => row
                .try_get::<Option<Uuid>, _>(index)?
                .map(|uuid| uuid.hyphenated().to_string()),
            TextSource::Json => row
                .try_get::<Option<JsonValue>, _>(index)?
                .map(|json| json.to_string()),
        };
        Ok(value)
    }
}

impl Sealed for StringBuilderWrapper {}

impl PgCompatibleBuilder for StringBuilderWrapper {
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match self.decode(row, index)? {
            Some(s) => {
                self.builder.append_value(s);
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

// ═══════════════════════════════════════════════════════════════════════════
// Binary Builders
// ═══════════════════════════════════════════════════════════════════════════

/// Builder for Arrow Binary arrays (BYTEA).
#[derive(Debug)]
pub struct BinaryBuilderWrapper {
    builder: BinaryBuilder,
    len: usize,
}

impl BinaryBuilderWrapper {
    /// Create a new binary builder.
    #[must_use]
    pub fn new(capacity: usize, data_capacity: usize) -> Self {
        Self {
            builder: BinaryBuilder::with_capacity(capacity, data_capacity),
            len: 0,
        }
    }
}

impl Sealed for BinaryBuilderWrapper {}

impl PgCompatibleBuilder for BinaryBuilderWrapper {
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match <Vec<u8>>::from_pg(row, index)? {
            Some(bytes) => {
                self.builder.append_value(bytes);
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
    use arrow_array::{Array, StringArray};
    use arrow_schema::DataType;

    use super::*;

    #[test]
    fn test_string_builder_nulls() {
        let mut builder = StringBuilderWrapper::new(2, 64, TextSource::Text);
        builder.append_null();
        assert_eq!(builder.len(), 1);

        let array = builder.finish();
        let strings = array.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(strings.len(), 1);
        assert!(strings.is_null(0));
        assert_eq!(builder.len(), 0);
    }

    #[test]
    fn test_string_builder_data_type_for_json() {
        let mut builder = StringBuilderWrapper::new(0, 0, TextSource::Json);
        assert_eq!(builder.finish().data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_binary_builder_type() {
        let mut builder = BinaryBuilderWrapper::new(1, 16);
        builder.append_null();
        let array = builder.finish();
        assert_eq!(array.data_type(), &DataType::Binary);
        assert_eq!(array.null_count(), 1);
    }
}
