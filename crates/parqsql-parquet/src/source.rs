use jiff::Timestamp;
use parqsql_core::{
    async_trait,
    driver::ColumnarSource,
    schema::PhysicalKind,
    value::Int96,
    ColumnarOp, ColumnarSchema, ColumnarType, Error, Field, Record, Result, Value,
};
use parquet::{
    data_type::Decimal,
    file::reader::{FileReader, SerializedFileReader},
    record::{Field as ParquetField, Row},
};
use std::{
    collections::VecDeque,
    fs::File,
    path::{Path, PathBuf},
};

/// Reads the records of one parquet file.
///
/// A row group is decoded as a whole and buffered; records are handed out
/// from the buffer. Values come back at their physical kind, so a decimal
/// column yields its unscaled integer or bytes and a string column yields
/// bytes.
pub struct ParquetSource {
    name: String,
    path: PathBuf,
    schema: ColumnarSchema,
    reader: SerializedFileReader<File>,
    next_row_group: usize,
    buffer: VecDeque<Record>,
}

impl ParquetSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let reader = SerializedFileReader::new(file).map_err(Error::driver_operation_failed)?;
        let schema = crate::schema::from_parquet(reader.metadata().file_metadata().schema_descr())
            .map_err(|err| err.context(format!("reading `{}`", path.display())))?;

        Ok(Self {
            name: path.display().to_string(),
            path,
            schema,
            reader,
            next_row_group: 0,
            buffer: VecDeque::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes row groups until at least one record is buffered or the file
    /// is exhausted.
    fn fill(&mut self) -> Result<()> {
        while self.buffer.is_empty() && self.next_row_group < self.reader.num_row_groups() {
            let row_group = self
                .reader
                .get_row_group(self.next_row_group)
                .map_err(Error::driver_operation_failed)?;

            let rows = row_group
                .get_row_iter(None)
                .map_err(Error::driver_operation_failed)?;

            for row in rows {
                let row = row.map_err(Error::driver_operation_failed)?;
                self.buffer.push_back(to_record(&self.schema, &row)?);
            }

            log::debug!(
                "read row group {} of `{}` ({} rows)",
                self.next_row_group,
                self.name,
                self.buffer.len()
            );

            self.next_row_group += 1;
        }

        Ok(())
    }
}

impl core::fmt::Debug for ParquetSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParquetSource")
            .field("path", &self.path)
            .field("schema", &self.schema.name)
            .field("next_row_group", &self.next_row_group)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}

#[async_trait]
impl ColumnarSource for ParquetSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &ColumnarSchema {
        &self.schema
    }

    async fn read_next(&mut self) -> Result<Option<Record>> {
        self.fill()?;
        Ok(self.buffer.pop_front())
    }
}

fn to_record(schema: &ColumnarSchema, row: &Row) -> Result<Record> {
    let mut record = Record::with_capacity(schema.len());

    for (column, (name, field)) in schema.columns.iter().zip(row.get_column_iter()) {
        let value = to_value(column, field)?;

        record.insert(if value.is_null() {
            Field::skip(name)
        } else {
            Field::new(name, value, op_for(column.physical))
        });
    }

    Ok(record)
}

fn op_for(physical: PhysicalKind) -> ColumnarOp {
    match physical {
        PhysicalKind::Boolean => ColumnarOp::Boolean,
        PhysicalKind::Int32 => ColumnarOp::Int32,
        PhysicalKind::Int64 => ColumnarOp::Int64,
        PhysicalKind::Int96 => ColumnarOp::Int96,
        PhysicalKind::Float => ColumnarOp::Float,
        PhysicalKind::Double => ColumnarOp::Double,
        PhysicalKind::Binary => ColumnarOp::Binary,
        PhysicalKind::FixedLenByteArray(_) => ColumnarOp::FixedLenByteArray,
    }
}

/// Maps a decoded parquet field back to the physical value it was stored as.
fn to_value(column: &ColumnarType, field: &ParquetField) -> Result<Value> {
    use ParquetField as F;
    use PhysicalKind as P;

    let value = match (column.physical, field) {
        (_, F::Null) => Value::Null,
        (P::Boolean, F::Bool(v)) => Value::Bool(*v),
        (P::Int32, F::Byte(v)) => Value::I32(*v as i32),
        (P::Int32, F::Short(v)) => Value::I32(*v as i32),
        (P::Int32, F::Int(v)) => Value::I32(*v),
        (P::Int32, F::UByte(v)) => Value::I32(*v as i32),
        (P::Int32, F::UShort(v)) => Value::I32(*v as i32),
        (P::Int32, F::UInt(v)) => Value::I32(*v as i32),
        (P::Int32, F::Date(v)) => Value::I32(*v),
        (P::Int64, F::Long(v)) => Value::I64(*v),
        (P::Int64, F::ULong(v)) => Value::I64(*v as i64),
        (P::Int64, F::TimestampMillis(v)) => Value::I64(*v),
        (P::Int64, F::TimestampMicros(v)) => Value::I64(*v),
        (P::Int96, F::TimestampMillis(v)) => Value::Int96(Int96::from_timestamp(
            Timestamp::from_millisecond(*v).map_err(|err| Error::convert(&column.name, err.to_string()))?,
        )),
        (P::Int96, F::TimestampMicros(v)) => Value::Int96(Int96::from_timestamp(
            Timestamp::from_microsecond(*v).map_err(|err| Error::convert(&column.name, err.to_string()))?,
        )),
        (P::Float, F::Float(v)) => Value::F32(*v),
        (P::Double, F::Double(v)) => Value::F64(*v),
        (_, F::Decimal(decimal)) => match decimal {
            Decimal::Int32 { value, .. } => Value::I32(i32::from_be_bytes(*value)),
            Decimal::Int64 { value, .. } => Value::I64(i64::from_be_bytes(*value)),
            Decimal::Bytes { value, .. } => Value::Bytes(value.data().to_vec()),
        },
        (P::Binary | P::FixedLenByteArray(_), F::Str(v)) => Value::Bytes(v.as_bytes().to_vec()),
        (P::Binary | P::FixedLenByteArray(_), F::Bytes(v)) => Value::Bytes(v.data().to_vec()),
        (physical, field) => {
            return Err(Error::convert(
                &column.name,
                format!("unexpected parquet value {field} in a {physical} column"),
            ))
        }
    };

    Ok(value)
}
