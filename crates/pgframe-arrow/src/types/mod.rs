//! Type mapping between PostgreSQL and Apache Arrow.

pub mod arrow;
pub mod postgres;
