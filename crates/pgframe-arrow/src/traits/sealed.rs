//! Sealed trait pattern for API evolution without breaking changes.
//!
//! External code can USE these traits but CANNOT implement them.
//! This allows adding methods to traits without breaking downstream crates.

use arrow_schema::DataType;
use sqlx::Row;
use sqlx::postgres::PgRow;

/// Private module that external crates cannot access.
///
/// This module is `pub(crate)` so that implementations can be provided
/// within this crate, but external crates cannot see or implement `Sealed`.
pub(crate) mod private {
    /// Marker trait that seals the public traits.
    pub trait Sealed {}
}

/// Native Rust types that can be decoded from a PostgreSQL row cell.
///
/// This trait is sealed - external implementations are not allowed.
pub trait FromPgValue: private::Sealed + Sized {
    /// The Arrow data type this value is stored as.
    fn arrow_type() -> DataType;

    /// Decode the cell at `index`, returning `None` for SQL `NULL`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the column type is incompatible or the
    /// value is malformed.
    fn from_pg(row: &PgRow, index: usize) -> crate::Result<Option<Self>>;
}

macro_rules! impl_from_pg_value {
    ($($native:ty => $arrow:expr),* $(,)?) => {
        $(
            impl private::Sealed for $native {}

            impl FromPgValue for $native {
                fn arrow_type() -> DataType {
                    $arrow
                }

                fn from_pg(row: &PgRow, index: usize) -> crate::Result<Option<Self>> {
                    Ok(row.try_get::<Option<Self>, _>(index)?)
                }
            }
        )*
    };
}

impl_from_pg_value! {
    bool => DataType::Boolean,
    i16 => DataType::Int16,
    i32 => DataType::Int32,
    i64 => DataType::Int64,
    f32 => DataType::Float32,
    f64 => DataType::Float64,
    Vec<u8> => DataType::Binary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_arrow_type() {
        assert_eq!(i32::arrow_type(), DataType::Int32);
    }

    #[test]
    fn test_bool_arrow_type() {
        assert_eq!(bool::arrow_type(), DataType::Boolean);
    }

    #[test]
    fn test_f64_arrow_type() {
        assert_eq!(f64::arrow_type(), DataType::Float64);
    }

    #[test]
    fn test_bytes_arrow_type() {
        assert_eq!(<Vec<u8>>::arrow_type(), DataType::Binary);
    }
}
