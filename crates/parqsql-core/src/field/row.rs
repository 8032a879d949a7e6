use super::{Field, SqlOp};
use crate::driver::RelationalSink;

/// Fields ready to bind to a relational sink, in target column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub fields: Vec<Field<SqlOp>>,
}

impl Row {
    pub fn new(fields: Vec<Field<SqlOp>>) -> Row {
        Row { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Field<SqlOp>> {
        self.fields.iter()
    }

    /// Binds every field to the sink, field `i` to parameter `i + 1`.
    pub fn apply(&self, sink: &mut dyn RelationalSink) {
        for (i, field) in self.fields.iter().enumerate() {
            field.apply(sink, i + 1);
        }
    }
}

impl core::ops::Index<usize> for Row {
    type Output = Field<SqlOp>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.fields[index]
    }
}
