//! Apache Arrow integration for PostgreSQL result sets.
//!
//! This crate converts rows fetched through `sqlx` into Apache Arrow
//! `RecordBatches` and extracts typed cells from Arrow arrays so they can be
//! bound as PostgreSQL statement parameters.
//!
//! # Features
//!
//! - Type-safe PostgreSQL to Arrow type mapping (and back, for DDL)
//! - Single-shot `RecordBatch` materialisation of fetched rows
//! - Sealed builder traits for API stability
//!
//! # Example
//!
//! ```rust,ignore
//! use pgframe_arrow::{ColumnSpec, rows_to_record_batch};
//!
//! let specs = ColumnSpec::from_columns(statement.columns())?;
//! let rows = statement.query().fetch_all(&mut conn).await?;
//! let batch = rows_to_record_batch(&specs, &rows)?;
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builders;
pub mod conversion;
pub mod error;
pub mod schema;
pub mod traits;
pub mod types;

// Re-export main types for convenience
pub use conversion::batch::rows_to_record_batch;
pub use conversion::params::{PgCell, cell_at};
pub use error::{ArrowConversionError, Result};
pub use schema::mapping::{ColumnSpec, SchemaMapper};
pub use traits::builder::PgCompatibleBuilder;
pub use types::arrow::{ColumnExt, arrow_type_to_pg, pg_field_to_arrow, pg_type_to_arrow};
pub use types::postgres::{NUMERIC_PRECISION, NUMERIC_SCALE, PgType, PgTypeCategory};
