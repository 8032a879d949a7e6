use super::{class, columnar_field, unexpected, Converter};
use crate::{
    codec,
    field::{ColumnarOp, Field, SourceField},
    schema::{ColumnDescriptor, ColumnarType, Logical, PhysicalKind},
    Result, Value,
};

/// Civil dates, stored as INT32 days since the epoch.
#[derive(Debug, Default)]
pub struct DateConverter;

impl Converter for DateConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::DATE
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        match src.value {
            Value::Date(date) => {
                let days = codec::date::encode_days(*date)?;
                Ok(columnar_field(src, days, ColumnarOp::Int32))
            }
            _ => Err(unexpected(src, "a date")),
        }
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        Ok(ColumnarType::new(&column.name, PhysicalKind::Int32)
            .with_logical(Logical::Date)
            .with_nullable(column.nullable))
    }
}
