use super::Field;
use crate::{driver::RelationalSink, schema::SqlType, Value};

/// Which [`RelationalSink`] setter a field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlOp {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Bytes,
    Date,
    Timestamp,
    /// Driver chooses how to bind the value
    Object,
    /// Typed null
    Null(SqlType),
    /// Untyped null, bound through the generic setter
    NullObject,
}

impl Field<SqlOp> {
    /// A null field bound to `op`.
    pub fn null(name: impl Into<String>, op: SqlOp) -> Field<SqlOp> {
        Field::new(name, Value::Null, op)
    }

    /// Binds the value to parameter `index` (1-based) of `sink`.
    ///
    /// Setters do not fail here. A sink that cannot accept a value records
    /// the problem and reports it from [`RelationalSink::add_batch`]. A value
    /// whose shape does not match the bound setter goes through
    /// [`RelationalSink::set_object`].
    pub fn apply(&self, sink: &mut dyn RelationalSink, index: usize) {
        match (self.op, &self.value) {
            (SqlOp::Null(ty), _) => sink.set_null(index, ty),
            (SqlOp::NullObject, _) => sink.set_object(index, &Value::Null),
            (SqlOp::Boolean, Value::Bool(v)) => sink.set_boolean(index, *v),
            (SqlOp::Byte, Value::I8(v)) => sink.set_byte(index, *v),
            (SqlOp::Short, Value::I16(v)) => sink.set_short(index, *v),
            (SqlOp::Int, Value::I32(v)) => sink.set_int(index, *v),
            (SqlOp::Long, Value::I64(v)) => sink.set_long(index, *v),
            (SqlOp::Float, Value::F32(v)) => sink.set_float(index, *v),
            (SqlOp::Double, Value::F64(v)) => sink.set_double(index, *v),
            (SqlOp::Decimal, Value::Decimal(v)) => sink.set_decimal(index, v),
            (SqlOp::String, Value::String(v)) => sink.set_string(index, v),
            (SqlOp::Bytes, Value::Bytes(v)) => sink.set_bytes(index, v),
            (SqlOp::Date, Value::Date(v)) => sink.set_date(index, *v),
            (SqlOp::Timestamp, Value::Timestamp(v)) => sink.set_timestamp(index, *v),
            (_, value) => sink.set_object(index, value),
        }
    }
}
