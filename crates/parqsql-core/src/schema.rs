//! Schema types for both sides of the bridge.
//!
//! The relational side is described by [`ColumnDescriptor`]s, one per result
//! column. The columnar side is described by a [`ColumnarSchema`] of
//! [`ColumnarType`]s, each a physical storage kind refined by an optional
//! [`Logical`] annotation.

mod column;
pub use column::ColumnDescriptor;

mod columnar;
pub use columnar::{ColumnarSchema, ColumnarType, Logical, PhysicalKind, TimeUnit};

pub mod decimal;
pub use decimal::DecimalWidth;

mod null_type;

mod sql_type;
pub use sql_type::SqlType;
