use super::{class, columnar_field, unexpected, Converter};
use crate::{
    field::{ColumnarOp, Field, SourceField},
    schema::{ColumnDescriptor, ColumnarType, PhysicalKind},
    Error, Result, Value,
};
use num_traits::ToPrimitive;

/// Double precision floats. Numeric values of other kinds are widened.
#[derive(Debug, Default)]
pub struct DoubleConverter;

impl Converter for DoubleConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::DOUBLE
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        let value = match src.value {
            Value::F64(v) => *v,
            Value::F32(v) => f64::from(*v),
            Value::I32(v) => f64::from(*v),
            Value::I64(v) => *v as f64,
            Value::Decimal(v) => v.to_f64().ok_or_else(|| {
                Error::convert(&src.descriptor.name, format!("{v} is out of range for f64"))
            })?,
            _ => return Err(unexpected(src, "a number")),
        };
        Ok(columnar_field(src, value, ColumnarOp::Double))
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        Ok(ColumnarType::new(&column.name, PhysicalKind::Double).with_nullable(column.nullable))
    }
}
