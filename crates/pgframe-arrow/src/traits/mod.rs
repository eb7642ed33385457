//! Trait definitions for PostgreSQL to Arrow conversion.
//!
//! - [`sealed`] - Sealed trait pattern and cell decoding for native types
//! - [`builder`] - Builder traits for Arrow array construction

pub mod builder;
pub mod sealed;

pub use builder::PgCompatibleBuilder;
pub use sealed::FromPgValue;
