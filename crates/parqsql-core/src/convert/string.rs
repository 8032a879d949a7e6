use super::{class, columnar_field, unexpected, Converter};
use crate::{
    field::{ColumnarOp, Field, SourceField},
    schema::{ColumnDescriptor, ColumnarType, Logical, PhysicalKind},
    Result, Value,
};

/// UTF-8 text, stored as BINARY annotated STRING.
#[derive(Debug, Default)]
pub struct StringConverter;

impl Converter for StringConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::STRING
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        match src.value {
            Value::String(v) => Ok(columnar_field(src, v.clone(), ColumnarOp::Binary)),
            _ => Err(unexpected(src, "a string")),
        }
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        Ok(ColumnarType::new(&column.name, PhysicalKind::Binary)
            .with_logical(Logical::String)
            .with_nullable(column.nullable))
    }
}
