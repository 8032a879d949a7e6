//! Values paired with the operation that applies them.
//!
//! A [`Field`] is produced once by a conversion and never mutated. The
//! operation is chosen at conversion time, so applying a field to a sink is a
//! single `match` with no further type inspection.

mod columnar_op;
pub use columnar_op::ColumnarOp;

mod record;
pub use record::Record;

mod row;
pub use row::Row;

mod source;
pub use source::{SourceField, SourceRow};

mod sql_op;
pub use sql_op::SqlOp;

use crate::Value;

/// A named value bound to the operation that applies it.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<Op> {
    pub name: String,
    pub value: Value,
    pub op: Op,
}

impl<Op> Field<Op> {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, op: Op) -> Field<Op> {
        Field {
            name: name.into(),
            value: value.into(),
            op,
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}
