//! Conversion between PostgreSQL rows and Arrow data.
//!
//! - [`batch`] - Fetched rows to `RecordBatch`
//! - [`params`] - Arrow cells to bindable statement parameters

pub mod batch;
pub mod params;

pub use batch::rows_to_record_batch;
pub use params::{PgCell, cell_at};
