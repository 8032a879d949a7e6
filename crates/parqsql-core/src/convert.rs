//! Per-class value and type conversion from the relational side to the
//! columnar side.
//!
//! A [`ConverterRegistry`] holds converters in priority order. Lookup walks
//! the list and returns the first converter that accepts a column's value
//! class, so converters registered later shadow earlier ones, including the
//! built-ins.

mod date;
pub use date::DateConverter;

mod decimal;
pub use decimal::DecimalConverter;

mod double;
pub use double::DoubleConverter;

mod primitive;
pub use primitive::{BooleanConverter, BytesConverter, FloatConverter, IntegerConverter, LongConverter};

mod string;
pub use string::StringConverter;

mod timestamp;
pub use timestamp::TimestampConverter;

use crate::{
    field::{ColumnarOp, Field, SourceField},
    schema::{ColumnDescriptor, ColumnarType},
    Error, Result, Value,
};
use jiff::tz::TimeZone;
use std::{fmt::Debug, sync::Arc};

/// Value class names produced by the bundled relational drivers.
pub mod class {
    pub const DECIMAL: &str = "BigDecimal";
    pub const DOUBLE: &str = "f64";
    pub const STRING: &str = "String";
    pub const TIMESTAMP: &str = "Timestamp";
    pub const BOOLEAN: &str = "bool";
    pub const BYTE: &str = "i8";
    pub const SHORT: &str = "i16";
    pub const INT: &str = "i32";
    pub const LONG: &str = "i64";
    pub const FLOAT: &str = "f32";
    pub const BYTES: &str = "Vec<u8>";
    pub const DATE: &str = "Date";
}

/// Converts values of one or more value classes.
pub trait Converter: Debug + Send + Sync + 'static {
    /// Whether this converter handles values of `class`.
    fn accepts(&self, class: &str) -> bool;

    /// Converts a non-null value into a field bound to its columnar write
    /// operation.
    fn to_columnar_value(&self, field: SourceField<'_>) -> Result<Field<ColumnarOp>>;

    /// Derives the columnar type of a column.
    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType>;
}

/// Ordered set of converters.
#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn Converter>>,

    /// Session time zone, used to encode and decode timestamps
    time_zone: TimeZone,
}

impl ConverterRegistry {
    /// The built-in converters with the system time zone.
    pub fn new() -> ConverterRegistry {
        ConverterRegistry::with_time_zone(TimeZone::system())
    }

    /// The built-in converters with the given session time zone.
    pub fn with_time_zone(time_zone: TimeZone) -> ConverterRegistry {
        let converters: Vec<Arc<dyn Converter>> = vec![
            Arc::new(DecimalConverter),
            Arc::new(DoubleConverter),
            Arc::new(StringConverter),
            Arc::new(TimestampConverter::new(time_zone.clone())),
            Arc::new(BooleanConverter),
            Arc::new(IntegerConverter::byte()),
            Arc::new(IntegerConverter::short()),
            Arc::new(IntegerConverter::int()),
            Arc::new(LongConverter),
            Arc::new(FloatConverter),
            Arc::new(BytesConverter),
            Arc::new(DateConverter),
        ];

        ConverterRegistry {
            converters,
            time_zone,
        }
    }

    /// A registry with no converters.
    pub fn empty(time_zone: TimeZone) -> ConverterRegistry {
        ConverterRegistry {
            converters: vec![],
            time_zone,
        }
    }

    /// Adds a converter ahead of every converter already registered.
    pub fn register(&mut self, converter: impl Converter) -> &mut Self {
        self.converters.insert(0, Arc::new(converter));
        self
    }

    /// The first converter that accepts `class`.
    pub fn lookup(&self, class: &str) -> Option<&dyn Converter> {
        self.converters
            .iter()
            .find(|converter| converter.accepts(class))
            .map(|converter| &**converter)
    }

    /// Like [`lookup`](Self::lookup), failing with an unsupported type error
    /// naming `column`.
    pub fn require(&self, column: &ColumnDescriptor) -> Result<&dyn Converter> {
        self.lookup(&column.value_class)
            .ok_or_else(|| Error::unsupported_type(&column.name, &column.value_class))
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        ConverterRegistry::new()
    }
}

/// Error for a value whose variant a converter does not handle.
fn unexpected(field: SourceField<'_>, expected: &str) -> Error {
    Error::convert(
        &field.descriptor.name,
        format!(
            "class `{}` expects {expected}, found {}",
            field.descriptor.value_class,
            field.value.kind_name()
        ),
    )
}

fn columnar_field(field: SourceField<'_>, value: impl Into<Value>, op: ColumnarOp) -> Field<ColumnarOp> {
    Field::new(&field.descriptor.name, value, op)
}
