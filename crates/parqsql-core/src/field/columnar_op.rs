use super::Field;
use crate::{driver::RecordConsumer, Error, Result, Value};

/// How a field is written to a [`RecordConsumer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnarOp {
    /// Nothing is written. Used for absent values.
    Skip,
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    Binary,
    FixedLenByteArray,
}

impl Field<ColumnarOp> {
    /// A field that writes nothing.
    pub fn skip(name: impl Into<String>) -> Field<ColumnarOp> {
        Field::new(name, Value::Null, ColumnarOp::Skip)
    }

    /// Writes the value to `consumer`.
    pub fn apply(&self, consumer: &mut dyn RecordConsumer) -> Result<()> {
        match (self.op, &self.value) {
            (ColumnarOp::Skip, _) => Ok(()),
            (ColumnarOp::Boolean, Value::Bool(v)) => consumer.add_boolean(*v),
            (ColumnarOp::Int32, Value::I32(v)) => consumer.add_int32(*v),
            (ColumnarOp::Int64, Value::I64(v)) => consumer.add_int64(*v),
            (ColumnarOp::Int96, Value::Int96(v)) => consumer.add_int96(*v),
            (ColumnarOp::Float, Value::F32(v)) => consumer.add_float(*v),
            (ColumnarOp::Double, Value::F64(v)) => consumer.add_double(*v),
            (ColumnarOp::Binary, Value::Bytes(v)) => consumer.add_binary(v),
            (ColumnarOp::Binary, Value::String(v)) => consumer.add_binary(v.as_bytes()),
            (ColumnarOp::FixedLenByteArray, Value::Bytes(v)) => consumer.add_fixed_len_byte_array(v),
            (op, value) => Err(Error::convert(
                &self.name,
                format!("{op:?} cannot write a {} value", value.kind_name()),
            )),
        }
    }
}
