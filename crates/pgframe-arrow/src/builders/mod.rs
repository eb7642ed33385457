//! Arrow array builders fed from PostgreSQL rows.
//!
//! One wrapper per Arrow array kind, plus a [`BuilderFactory`] that picks the
//! right wrapper for a column type.

pub mod decimal;
pub mod factory;
pub mod primitive;
pub mod string;
pub mod temporal;

pub use decimal::{Decimal128BuilderWrapper, DecimalConfig};
pub use factory::BuilderFactory;
pub use primitive::{BooleanBuilderWrapper, OidBuilderWrapper, PrimitiveBuilderWrapper};
pub use string::{BinaryBuilderWrapper, StringBuilderWrapper, TextSource};
pub use temporal::{
    Date32BuilderWrapper, Time64MicrosecondBuilderWrapper, TimestampMicrosecondBuilderWrapper,
};
