use super::{ColumnarOp, Field};
use indexmap::IndexMap;

/// One columnar record: fields addressable by name or position.
///
/// A record holds at most one field per name. Inserting a field under an
/// existing name replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Field<ColumnarOp>>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    pub fn with_capacity(capacity: usize) -> Record {
        Record {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts a field, returning the one it replaced.
    pub fn insert(&mut self, field: Field<ColumnarOp>) -> Option<Field<ColumnarOp>> {
        self.fields.insert(field.name.clone(), field)
    }

    pub fn get(&self, name: &str) -> Option<&Field<ColumnarOp>> {
        self.fields.get(name)
    }

    pub fn get_index(&self, index: usize) -> Option<&Field<ColumnarOp>> {
        self.fields.get_index(index).map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Field<ColumnarOp>> {
        self.fields.values()
    }
}

impl FromIterator<Field<ColumnarOp>> for Record {
    fn from_iter<T: IntoIterator<Item = Field<ColumnarOp>>>(iter: T) -> Self {
        let mut record = Record::new();
        for field in iter {
            record.insert(field);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = Field<ColumnarOp>;
    type IntoIter = indexmap::map::IntoValues<String, Field<ColumnarOp>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_values()
    }
}
