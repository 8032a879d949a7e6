use parqsql_core::{
    codec,
    field::{ColumnarOp, Field, Record, Row, SourceRow, SqlOp},
    schema::{ColumnarSchema, ColumnarType, Logical, PhysicalKind},
    ConverterRegistry, Error, Result, Value,
};
use std::sync::Arc;

/// Converts single rows and records between the two sides.
#[derive(Debug, Clone)]
pub struct RecordBridge {
    registry: Arc<ConverterRegistry>,
}

impl RecordBridge {
    pub fn new(registry: Arc<ConverterRegistry>) -> RecordBridge {
        RecordBridge { registry }
    }

    pub fn registry(&self) -> &Arc<ConverterRegistry> {
        &self.registry
    }

    /// Converts a relational row into a columnar record.
    ///
    /// Absent values become fields that write nothing. Any value that cannot
    /// be converted fails the whole row.
    pub fn convert_row(&self, row: &SourceRow) -> Result<Record> {
        let mut record = Record::with_capacity(row.values.len());

        for field in row.fields() {
            let column = field.descriptor;

            if field.value.is_null() {
                record.insert(Field::skip(&column.name));
                continue;
            }

            let converted = self.registry.require(column)?.to_columnar_value(field)?;
            record.insert(converted);
        }

        Ok(record)
    }

    /// Converts a columnar record into a row for `target`, decoding each
    /// present field with the target's type for that column.
    pub fn convert_record(&self, record: &Record, target: &ColumnarSchema) -> Result<Row> {
        self.reconcile(record, target, target)
    }

    /// Converts a record read from `source` into a row for `target`.
    ///
    /// The row holds exactly one field per target column, in target order.
    /// Target columns missing from the record, or null in it, become nulls
    /// typed by the target column. Record fields with no target column are
    /// dropped. Present fields are decoded using their type in `source`.
    pub fn reconcile(
        &self,
        record: &Record,
        source: &ColumnarSchema,
        target: &ColumnarSchema,
    ) -> Result<Row> {
        let mut fields = Vec::with_capacity(target.len());

        for column in &target.columns {
            let field = match record.get(&column.name) {
                Some(field) if !field.is_null() => {
                    let ty = source.column(&column.name).unwrap_or(column);
                    self.decode(field, ty)?
                }
                _ => Field::null(&column.name, column.null_op()),
            };
            fields.push(field);
        }

        Ok(Row::new(fields))
    }

    /// Decodes one stored physical value into a field bound to the matching
    /// relational setter.
    fn decode(&self, field: &Field<ColumnarOp>, ty: &ColumnarType) -> Result<Field<SqlOp>> {
        let name = &field.name;
        let tz = self.registry.time_zone();

        let (value, op) = match (ty.physical, ty.logical, &field.value) {
            (PhysicalKind::Boolean, None, Value::Bool(v)) => (Value::Bool(*v), SqlOp::Boolean),

            (PhysicalKind::Int32, None, Value::I32(v)) => (Value::I32(*v), SqlOp::Int),
            (PhysicalKind::Int32, Some(Logical::Int { bit_width, signed }), Value::I32(v)) => {
                decode_int32(name, *v, bit_width, signed)?
            }
            (PhysicalKind::Int32, Some(Logical::Date), Value::I32(v)) => {
                (Value::Date(codec::date::decode_days(*v)?), SqlOp::Date)
            }

            (PhysicalKind::Int64, None, Value::I64(v)) => (Value::I64(*v), SqlOp::Long),
            (PhysicalKind::Int64, Some(Logical::Int { bit_width: 64, signed }), Value::I64(v)) => {
                if signed {
                    (Value::I64(*v), SqlOp::Long)
                } else {
                    // unsigned 64-bit values do not fit any signed setter
                    (Value::Decimal((*v as u64).into()), SqlOp::Decimal)
                }
            }
            (PhysicalKind::Int64, Some(Logical::Timestamp { unit, .. }), Value::I64(v)) => (
                Value::Timestamp(codec::timestamp::decode(*v, unit, tz)?),
                SqlOp::Timestamp,
            ),

            (PhysicalKind::Int96, None, Value::Int96(v)) => {
                (Value::Timestamp(v.to_timestamp()?), SqlOp::Timestamp)
            }

            (PhysicalKind::Float, None, Value::F32(v)) => (Value::F32(*v), SqlOp::Float),
            (PhysicalKind::Double, None, Value::F64(v)) => (Value::F64(*v), SqlOp::Double),

            (
                PhysicalKind::Int32
                | PhysicalKind::Int64
                | PhysicalKind::Binary
                | PhysicalKind::FixedLenByteArray(_),
                Some(Logical::Decimal { scale, .. }),
                stored @ (Value::I32(_) | Value::I64(_) | Value::Bytes(_)),
            ) => (
                Value::Decimal(codec::decimal::decode(name, stored, scale)?),
                SqlOp::Decimal,
            ),

            (
                PhysicalKind::Binary,
                Some(Logical::String | Logical::Enum | Logical::Json),
                Value::Bytes(v),
            ) => {
                let text = String::from_utf8(v.clone())
                    .map_err(|err| Error::convert(name, format!("invalid UTF-8: {err}")))?;
                (Value::String(text), SqlOp::String)
            }
            (PhysicalKind::Binary, Some(Logical::String), Value::String(v)) => {
                (Value::String(v.clone()), SqlOp::String)
            }

            (PhysicalKind::Binary, None, Value::Bytes(v))
            | (PhysicalKind::FixedLenByteArray(_), None | Some(Logical::Uuid), Value::Bytes(v)) => {
                (Value::Bytes(v.clone()), SqlOp::Bytes)
            }

            (_, Some(Logical::Time { .. }), _) => {
                return Err(Error::unmappable_type(name, ty.to_string()))
            }

            (physical, _, value) if physical_matches(physical, value) => {
                return Err(Error::unmappable_type(name, ty.to_string()))
            }

            (_, _, value) => {
                return Err(Error::convert(
                    name,
                    format!("a {} value cannot be stored as {ty}", value.kind_name()),
                ))
            }
        };

        Ok(Field::new(name, value, op))
    }
}

fn decode_int32(name: &str, v: i32, bit_width: u8, signed: bool) -> Result<(Value, SqlOp)> {
    let out_of_range = || {
        Error::convert(
            name,
            format!("{v} is out of range for INT({bit_width},{signed})"),
        )
    };

    Ok(match (bit_width, signed) {
        (8, true) => {
            let v = i8::try_from(v).map_err(|_| out_of_range())?;
            (Value::I8(v), SqlOp::Byte)
        }
        (16, true) | (8, false) => {
            let v = i16::try_from(v).map_err(|_| out_of_range())?;
            (Value::I16(v), SqlOp::Short)
        }
        (16, false) | (32, true) => (Value::I32(v), SqlOp::Int),
        (32, false) => (Value::I64(i64::from(v as u32)), SqlOp::Long),
        _ => return Err(out_of_range()),
    })
}

/// Whether `value` is the shape `physical` stores, regardless of annotation.
fn physical_matches(physical: PhysicalKind, value: &Value) -> bool {
    matches!(
        (physical, value),
        (PhysicalKind::Boolean, Value::Bool(_))
            | (PhysicalKind::Int32, Value::I32(_))
            | (PhysicalKind::Int64, Value::I64(_))
            | (PhysicalKind::Int96, Value::Int96(_))
            | (PhysicalKind::Float, Value::F32(_))
            | (PhysicalKind::Double, Value::F64(_))
            | (PhysicalKind::Binary, Value::Bytes(_))
            | (PhysicalKind::FixedLenByteArray(_), Value::Bytes(_))
    )
}
