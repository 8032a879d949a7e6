use super::{class, columnar_field, unexpected, Converter};
use crate::{
    codec,
    field::{ColumnarOp, Field, SourceField},
    schema::{ColumnDescriptor, ColumnarType, Logical, PhysicalKind, TimeUnit},
    Result, Value,
};
use jiff::tz::TimeZone;

/// Instants, stored as INT64 milliseconds of the session wall clock.
///
/// See [`codec::timestamp`] for the encoding.
#[derive(Debug, Clone)]
pub struct TimestampConverter {
    time_zone: TimeZone,
}

impl TimestampConverter {
    pub fn new(time_zone: TimeZone) -> TimestampConverter {
        TimestampConverter { time_zone }
    }
}

impl Converter for TimestampConverter {
    fn accepts(&self, class: &str) -> bool {
        class == class::TIMESTAMP
    }

    fn to_columnar_value(&self, src: SourceField<'_>) -> Result<Field<ColumnarOp>> {
        match src.value {
            Value::Timestamp(ts) => {
                let stored = codec::timestamp::encode_millis(*ts, &self.time_zone);
                Ok(columnar_field(src, stored, ColumnarOp::Int64))
            }
            _ => Err(unexpected(src, "a timestamp")),
        }
    }

    fn to_columnar_type(&self, column: &ColumnDescriptor) -> Result<ColumnarType> {
        Ok(ColumnarType::new(&column.name, PhysicalKind::Int64)
            .with_logical(Logical::Timestamp {
                unit: TimeUnit::Millis,
                utc: true,
            })
            .with_nullable(column.nullable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SqlType;

    #[test]
    fn stores_wall_clock_millis() {
        let tz = TimeZone::get("Europe/Paris").unwrap();
        let converter = TimestampConverter::new(tz);
        let column = ColumnDescriptor::new("created_at", SqlType::TIMESTAMP, class::TIMESTAMP);
        let ts: jiff::Timestamp = "2022-07-01T10:00:00Z".parse().unwrap();
        let value = Value::Timestamp(ts);

        let field = converter
            .to_columnar_value(SourceField {
                descriptor: &column,
                value: &value,
            })
            .unwrap();

        let wall: jiff::Timestamp = "2022-07-01T12:00:00Z".parse().unwrap();
        assert_eq!(field.op, ColumnarOp::Int64);
        assert_eq!(field.value, Value::I64(wall.as_millisecond()));
    }
}
