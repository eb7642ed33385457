//! Single-shot conversion from PostgreSQL rows to Arrow `RecordBatch`.
//!
//! Provides convenience functions for converting a slice of fetched rows
//! into a `RecordBatch` without streaming.

use arrow_array::{RecordBatch, RecordBatchOptions};
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::builders::factory::BuilderFactory;
use crate::schema::mapping::{ColumnSpec, SchemaMapper};
use crate::traits::builder::PgCompatibleBuilder;
use crate::{ArrowConversionError, Result};

/// Convert fetched PostgreSQL rows to an Arrow `RecordBatch`.
///
/// The schema comes from `specs`, so an empty `rows` slice still yields a
/// batch with the statement's columns.
///
/// # Arguments
///
/// * `specs` - Column specs resolved from the prepared statement
/// * `rows` - Rows fetched with that statement
///
/// # Errors
///
/// Returns error if:
/// - A row's width doesn't match the column specs
/// - Value conversion fails
/// - `RecordBatch` creation fails
///
/// # Example
///
/// ```rust,ignore
/// use pgframe_arrow::{ColumnSpec, rows_to_record_batch};
///
/// let specs = ColumnSpec::from_columns(statement.columns())?;
/// let rows = statement.query().fetch_all(&mut conn).await?;
/// let batch = rows_to_record_batch(&specs, &rows)?;
/// ```
pub fn rows_to_record_batch(specs: &[ColumnSpec], rows: &[PgRow]) -> Result<RecordBatch> {
    let schema = SchemaMapper::schema_ref_from_specs(specs);

    if rows.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let factory = BuilderFactory::new(rows.len());
    let mut builders = factory.create_builders_for_specs(specs)?;

    for row in rows {
        append_row_to_builders(&mut builders, specs, row)?;
    }

    let arrays: Vec<_> = builders.iter_mut().map(|b| b.finish()).collect();

    // Row count is explicit so zero-column results (`SELECT FROM t`) keep it.
    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    RecordBatch::try_new_with_options(schema, arrays, &options)
        .map_err(|e| ArrowConversionError::value_conversion("batch", e.to_string()))
}

/// Append a single row to a vector of builders.
///
/// # Errors
///
/// Returns error if value conversion fails or column count mismatches.
fn append_row_to_builders(
    builders: &mut [Box<dyn PgCompatibleBuilder>],
    specs: &[ColumnSpec],
    row: &PgRow,
) -> Result<()> {
    if row.len() != builders.len() {
        return Err(ArrowConversionError::schema_mismatch(
            builders.len(),
            row.len(),
        ));
    }

    for (index, (builder, spec)) in builders.iter_mut().zip(specs).enumerate() {
        builder
            .append_pg_value(row, index)
            .map_err(|e| with_column(e, spec))?;
    }

    Ok(())
}

/// Attach the column name to decode failures, which sqlx reports by index.
fn with_column(err: ArrowConversionError, spec: &ColumnSpec) -> ArrowConversionError {
    if err.is_decode_error() {
        ArrowConversionError::value_conversion(spec.name(), err.to_string())
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use arrow_schema::DataType;

    use super::*;
    use crate::types::postgres::PgType;

    #[test]
    fn test_empty_rows_keep_schema() {
        let specs = vec![
            ColumnSpec::new("id", PgType::Int8),
            ColumnSpec::new("price", PgType::Numeric),
            ColumnSpec::new("seen_at", PgType::Timestamptz),
        ];

        let batch = rows_to_record_batch(&specs, &[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 3);

        let schema = batch.schema();
        assert_eq!(schema.field(0).name(), "id");
        assert_eq!(schema.field(0).data_type(), &DataType::Int64);
        assert_eq!(schema.field(1).data_type(), &DataType::Decimal128(38, 10));
    }

    #[test]
    fn test_empty_specs_and_rows() {
        let batch = rows_to_record_batch(&[], &[]).unwrap();
        assert_eq!(batch.num_columns(), 0);
        assert_eq!(batch.num_rows(), 0);
    }

    #[test]
    fn test_with_column_wraps_decode_errors() {
        let spec = ColumnSpec::new("amount", PgType::Int4);
        let decode = ArrowConversionError::from(sqlx::Error::ColumnNotFound("x".into()));
        let wrapped = with_column(decode, &spec);
        assert!(wrapped.is_value_conversion());
        assert!(wrapped.to_string().contains("amount"));

        let overflow = ArrowConversionError::decimal_overflow(38, 10);
        assert!(with_column(overflow, &spec).is_decimal_overflow());
    }
}
