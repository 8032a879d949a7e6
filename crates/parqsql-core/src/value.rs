mod int96;
pub use int96::Int96;

use bigdecimal::BigDecimal;
use jiff::civil;

/// A single value on either side of the bridge.
///
/// Relational sources produce values typed by their column's value class;
/// columnar sources produce values at the physical level (`I32`, `I64`,
/// `Bytes`, ...) which the read path decodes using the column's logical
/// annotation.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    Bool(bool),

    I8(i8),

    I16(i16),

    I32(i32),

    I64(i64),

    /// Legacy 96-bit timestamp
    Int96(Int96),

    F32(f32),

    F64(f64),

    /// Arbitrary precision decimal
    Decimal(BigDecimal),

    String(String),

    Bytes(Vec<u8>),

    /// Civil date with no time zone
    Date(civil::Date),

    /// An instant
    Timestamp(jiff::Timestamp),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::Int96(_) => "int96",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

impl_value_conversions! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    Int96 => Int96,
    f32 => F32,
    f64 => F64,
    BigDecimal => Decimal,
    String => String,
    Vec<u8> => Bytes,
    civil::Date => Date,
    jiff::Timestamp => Timestamp,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}
