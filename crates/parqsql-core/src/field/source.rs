use crate::{schema::ColumnDescriptor, Value};
use std::sync::Arc;

/// One row read from a relational source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// Column metadata shared by every row of the source
    pub columns: Arc<[ColumnDescriptor]>,

    /// One value per column, `Value::Null` when absent
    pub values: Vec<Value>,
}

/// A value together with the metadata of its column.
#[derive(Debug, Clone, Copy)]
pub struct SourceField<'a> {
    pub descriptor: &'a ColumnDescriptor,
    pub value: &'a Value,
}

impl SourceRow {
    pub fn new(columns: Arc<[ColumnDescriptor]>, values: Vec<Value>) -> SourceRow {
        SourceRow { columns, values }
    }

    pub fn fields(&self) -> impl Iterator<Item = SourceField<'_>> {
        self.columns
            .iter()
            .zip(&self.values)
            .map(|(descriptor, value)| SourceField { descriptor, value })
    }
}
