//! Builder traits for Arrow array construction.
//!
//! This module defines the [`PgCompatibleBuilder`] trait that all Arrow
//! builders must implement to accept PostgreSQL row cells.

use arrow_array::ArrayRef;
use sqlx::postgres::PgRow;

use super::sealed::private::Sealed;

/// Marker trait for Arrow builders that can accept PostgreSQL values.
///
/// This trait is sealed to prevent external implementations that might
/// violate invariants around null handling and type safety.
///
/// # Implementors
///
/// Wrapper types in the `builders` module:
/// - `PrimitiveBuilderWrapper<T>`, `BooleanBuilderWrapper`, `OidBuilderWrapper`
/// - `StringBuilderWrapper`, `BinaryBuilderWrapper`
/// - `Decimal128BuilderWrapper`
/// - `Date32BuilderWrapper`, `Time64MicrosecondBuilderWrapper`,
///   `TimestampMicrosecondBuilderWrapper`
pub trait PgCompatibleBuilder: Sealed + Send {
    /// Decode the cell at `index` of `row` and append it, appending a null
    /// for SQL `NULL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be decoded or converted to the
    /// target type.
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> crate::Result<()>;

    /// Append a null value to this builder.
    fn append_null(&mut self);

    /// Finish building and return the Arrow array.
    ///
    /// After calling this method, the builder is reset and can be reused.
    fn finish(&mut self) -> ArrayRef;

    /// Returns the number of values (including nulls) appended so far.
    fn len(&self) -> usize;

    /// Returns true if no values have been appended.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe
    fn _assert_object_safe(_: &dyn PgCompatibleBuilder) {}
}
