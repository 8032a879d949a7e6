use super::{class, columnar_field, unexpected, Converter};
use crate::{
    codec,
    field::{ColumnarOp, Field, SourceField},
    schema::{
        decimal::{effective_precision, effective_scale},
        ColumnDescriptor, ColumnarType, DecimalWidth, Logical,
    },
    Result, Value,
};
use bigdecimal::BigDecimal;

/// Decimals, stored as INT32, INT64 or BINARY depending on precision.
#[derive(Debug, Default)]
pub struct DecimalConverter;

impl Converter for DecimalConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::DECIMAL
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        let value = match src.value {
            Value::Decimal(v) => v.clone(),
            Value::I8(v) => BigDecimal::from(*v),
            Value::I16(v) => BigDecimal::from(*v),
            Value::I32(v) => BigDecimal::from(*v),
            Value::I64(v) => BigDecimal::from(*v),
            _ => return Err(unexpected(src, "a decimal")),
        };

        let column = src.descriptor;
        let stored = codec::decimal::encode(&column.name, &value, column.precision, column.scale)?;
        let op = match stored {
            Value::I32(_) => ColumnarOp::Int32,
            Value::I64(_) => ColumnarOp::Int64,
            _ => ColumnarOp::Binary,
        };
        Ok(columnar_field(src, stored, op))
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        let precision = effective_precision(column.precision);
        let scale = effective_scale(column.scale);

        Ok(
            ColumnarType::new(&column.name, DecimalWidth::for_precision(precision).physical())
                .with_logical(Logical::Decimal { scale, precision })
                .with_nullable(column.nullable),
        )
    }
}
