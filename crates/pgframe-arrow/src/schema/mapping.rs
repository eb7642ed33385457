//! PostgreSQL to Arrow schema mapping.
//!
//! Converts result-set column metadata to an Arrow Schema.

use std::sync::Arc;

use arrow_schema::{Field, Schema, SchemaRef};
use sqlx::Column;
use sqlx::postgres::PgColumn;

use crate::Result;
use crate::types::arrow::{ColumnExt, pg_field_to_arrow};
use crate::types::postgres::PgType;

/// Name and resolved type of one result column.
///
/// Decoupled from `PgColumn` so batches can be assembled from metadata that
/// did not come straight from a prepared statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    name: String,
    pg_type: PgType,
}

impl ColumnSpec {
    /// Create a column spec.
    #[must_use]
    pub fn new(name: impl Into<String>, pg_type: PgType) -> Self {
        Self {
            name: name.into(),
            pg_type,
        }
    }

    /// Resolve a spec from sqlx column metadata.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-type error if the column type has no mapping.
    pub fn from_column(column: &PgColumn) -> Result<Self> {
        Ok(Self::new(column.name(), column.pg_type()?))
    }

    /// Resolve specs for every column, preserving order.
    ///
    /// # Errors
    ///
    /// Fails on the first column whose type has no mapping.
    pub fn from_columns(columns: &[PgColumn]) -> Result<Vec<Self>> {
        columns.iter().map(Self::from_column).collect()
    }

    /// Column name as reported by the server.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved PostgreSQL type.
    #[must_use]
    pub const fn pg_type(&self) -> PgType {
        self.pg_type
    }

    /// Arrow field for this column.
    #[must_use]
    pub fn to_arrow_field(&self) -> Field {
        pg_field_to_arrow(&self.name, self.pg_type)
    }
}

/// Schema mapper for converting PostgreSQL column metadata to Arrow schema.
///
/// # Example
///
/// ```rust,ignore
/// use pgframe_arrow::SchemaMapper;
///
/// let schema = SchemaMapper::from_columns(statement.columns())?;
/// let fields = schema.fields();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaMapper;

impl SchemaMapper {
    /// Create a new schema mapper.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Build an Arrow schema from sqlx column metadata.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-type error if any column type has no mapping.
    pub fn from_columns(columns: &[PgColumn]) -> Result<Schema> {
        let fields = columns
            .iter()
            .map(ColumnExt::to_arrow_field)
            .collect::<Result<Vec<Field>>>()?;

        Ok(Schema::new(fields))
    }

    /// Build an Arrow schema from resolved column specs.
    #[must_use]
    pub fn from_specs(specs: &[ColumnSpec]) -> Schema {
        Schema::new(
            specs
                .iter()
                .map(ColumnSpec::to_arrow_field)
                .collect::<Vec<_>>(),
        )
    }

    /// Build an Arrow `SchemaRef` from resolved column specs.
    ///
    /// Returns an `Arc<Schema>` for efficient sharing.
    #[must_use]
    pub fn schema_ref_from_specs(specs: &[ColumnSpec]) -> SchemaRef {
        Arc::new(Self::from_specs(specs))
    }
}
