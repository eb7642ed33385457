//! Primitive type builders.
//!
//! Implements builders for:
//! - `Int16`, `Int32`, `Int64`, `Float32`, `Float64` (generic wrapper)
//! - `Boolean` (BOOL)
//! - `Int64` from `OID`

use std::sync::Arc;

use arrow_array::builder::{BooleanBuilder, Int64Builder, PrimitiveBuilder};
use arrow_array::{ArrayRef, ArrowPrimitiveType};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::postgres::types::Oid;

use crate::Result;
use crate::traits::builder::PgCompatibleBuilder;
use crate::traits::sealed::FromPgValue;
use crate::traits::sealed::private::Sealed;

/// Builder for Arrow primitive arrays whose native type decodes directly
/// from a PostgreSQL cell (`INT2`, `INT4`, `INT8`, `FLOAT4`, `FLOAT8`).
#[derive(Debug)]
pub struct PrimitiveBuilderWrapper<T: ArrowPrimitiveType> {
    builder: PrimitiveBuilder<T>,
    len: usize,
}

impl<T: ArrowPrimitiveType> PrimitiveBuilderWrapper<T> {
    /// Create a new builder with room for `capacity` values.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            builder: PrimitiveBuilder::with_capacity(capacity),
            len: 0,
        }
    }
}

impl<T: ArrowPrimitiveType> Sealed for PrimitiveBuilderWrapper<T> {}

impl<T> PgCompatibleBuilder for PrimitiveBuilderWrapper<T>
where
    T: ArrowPrimitiveType,
    T::Native: FromPgValue,
{
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match T::Native::from_pg(row, index)? {
            Some(value) => {
                self.builder.append_value(value);
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

/// Builder for Arrow Boolean arrays (BOOL).
#[derive(Debug)]
pub struct BooleanBuilderWrapper {
    builder: BooleanBuilder,
    len: usize,
}

impl BooleanBuilderWrapper {
    /// Create a new boolean builder.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            builder: BooleanBuilder::with_capacity(capacity),
            len: 0,
        }
    }
}

impl Sealed for BooleanBuilderWrapper {}

impl PgCompatibleBuilder for BooleanBuilderWrapper {
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match bool::from_pg(row, index)? {
            Some(value) => {
                self.builder.append_value(value);
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

/// Builder for Arrow Int64 arrays fed from `OID` columns.
///
/// OIDs are unsigned 32-bit integers; widening to Int64 keeps every value.
#[derive(Debug)]
pub struct OidBuilderWrapper {
    builder: Int64Builder,
    len: usize,
}

impl OidBuilderWrapper {
    /// Create a new OID builder.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            builder: Int64Builder::with_capacity(capacity),
            len: 0,
        }
    }
}

impl Sealed for OidBuilderWrapper {}

impl PgCompatibleBuilder for OidBuilderWrapper {
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match row.try_get::<Option<Oid>, _>(index)? {
            Some(oid) => {
                self.builder.append_value(i64::from(oid.0));
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
