use super::{class, columnar_field, unexpected, Converter};
use crate::{
    field::{ColumnarOp, Field, SourceField},
    schema::{ColumnDescriptor, ColumnarType, Logical, PhysicalKind},
    Error, Result, Value,
};

#[derive(Debug, Default)]
pub struct BooleanConverter;

impl Converter for BooleanConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::BOOLEAN
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        match src.value {
            Value::Bool(v) => Ok(columnar_field(src, *v, ColumnarOp::Boolean)),
            _ => Err(unexpected(src, "a bool")),
        }
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        Ok(ColumnarType::new(&column.name, PhysicalKind::Boolean).with_nullable(column.nullable))
    }
}

/// Signed integers of at most 32 bits, stored as INT32.
///
/// Columns narrower than 32 bits carry an `INT(bit_width, signed)`
/// annotation.
#[derive(Debug)]
pub struct IntegerConverter {
    class: &'static str,
    bit_width: u8,
}

impl IntegerConverter {
    pub fn byte() -> IntegerConverter {
        IntegerConverter {
            class: class::BYTE,
            bit_width: 8,
        }
    }

    pub fn short() -> IntegerConverter {
        IntegerConverter {
            class: class::SHORT,
            bit_width: 16,
        }
    }

    pub fn int() -> IntegerConverter {
        IntegerConverter {
            class: class::INT,
            bit_width: 32,
        }
    }
}

impl Converter for IntegerConverter {
    fn accepts(&self, class: &str) -> bool {
        class == self.class
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        let value = match src.value {
            Value::I8(v) => i64::from(*v),
            Value::I16(v) => i64::from(*v),
            Value::I32(v) => i64::from(*v),
            Value::I64(v) => *v,
            _ => return Err(unexpected(src, "an integer")),
        };

        let max = (1_i64 << (self.bit_width - 1)) - 1;
        let min = -(1_i64 << (self.bit_width - 1));
        if value < min || value > max {
            return Err(Error::convert(
                &src.descriptor.name,
                format!("{value} does not fit in {} bits", self.bit_width),
            ));
        }

        Ok(columnar_field(src, value as i32, ColumnarOp::Int32))
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        let ty = ColumnarType::new(&column.name, PhysicalKind::Int32).with_nullable(column.nullable);

        Ok(if self.bit_width < 32 {
            ty.with_logical(Logical::Int {
                bit_width: self.bit_width,
                signed: true,
            })
        } else {
            ty
        })
    }
}

#[derive(Debug, Default)]
pub struct LongConverter;

impl Converter for LongConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::LONG
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        let value = match src.value {
            Value::I8(v) => i64::from(*v),
            Value::I16(v) => i64::from(*v),
            Value::I32(v) => i64::from(*v),
            Value::I64(v) => *v,
            _ => return Err(unexpected(src, "an integer")),
        };
        Ok(columnar_field(src, value, ColumnarOp::Int64))
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        Ok(ColumnarType::new(&column.name, PhysicalKind::Int64).with_nullable(column.nullable))
    }
}

#[derive(Debug, Default)]
pub struct FloatConverter;

impl Converter for FloatConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::FLOAT
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        match src.value {
            Value::F32(v) => Ok(columnar_field(src, *v, ColumnarOp::Float)),
            // sqlite reports every REAL as a double
            Value::F64(v) => Ok(columnar_field(src, *v as f32, ColumnarOp::Float)),
            _ => Err(unexpected(src, "a float")),
        }
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        Ok(ColumnarType::new(&column.name, PhysicalKind::Float).with_nullable(column.nullable))
    }
}

#[derive(Debug, Default)]
pub struct BytesConverter;

impl Converter for BytesConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::BYTES
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        match src.value {
            Value::Bytes(v) => Ok(columnar_field(src, v.clone(), ColumnarOp::Binary)),
            _ => Err(unexpected(src, "bytes")),
        }
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        Ok(ColumnarType::new(&column.name, PhysicalKind::Binary).with_nullable(column.nullable))
    }
}
