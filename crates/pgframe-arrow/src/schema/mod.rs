//! Schema mapping from PostgreSQL result metadata to Arrow.

pub mod mapping;

pub use mapping::{ColumnSpec, SchemaMapper};
