use parqsql_core::{
    driver::RecordConsumer, schema::PhysicalKind, value::Int96, ColumnarType, Error, Result,
};
use parquet::{
    column::writer::ColumnWriter,
    data_type::{ByteArray, FixedLenByteArray, Int96 as ParquetInt96},
};

/// Values of one column for the row group being buffered.
#[derive(Debug)]
pub(super) struct ColumnBuffer {
    name: String,
    nullable: bool,
    values: Values,
    def_levels: Vec<i16>,
}

#[derive(Debug)]
enum Values {
    Boolean(Vec<bool>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Int96(Vec<ParquetInt96>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Binary(Vec<ByteArray>),
    FixedLenByteArray(usize, Vec<FixedLenByteArray>),
}

/// Buffer lengths, used to undo a partially written record.
#[derive(Debug, Clone, Copy)]
pub(super) struct Mark {
    values: usize,
    levels: usize,
}

impl ColumnBuffer {
    pub(super) fn new(column: &ColumnarType) -> ColumnBuffer {
        let values = match column.physical {
            PhysicalKind::Boolean => Values::Boolean(vec![]),
            PhysicalKind::Int32 => Values::Int32(vec![]),
            PhysicalKind::Int64 => Values::Int64(vec![]),
            PhysicalKind::Int96 => Values::Int96(vec![]),
            PhysicalKind::Float => Values::Float(vec![]),
            PhysicalKind::Double => Values::Double(vec![]),
            PhysicalKind::Binary => Values::Binary(vec![]),
            PhysicalKind::FixedLenByteArray(len) => {
                Values::FixedLenByteArray(len.max(0) as usize, vec![])
            }
        };

        ColumnBuffer {
            name: column.name.clone(),
            nullable: column.nullable,
            values,
            def_levels: vec![],
        }
    }

    pub(super) fn mark(&self) -> Mark {
        Mark {
            values: self.values.len(),
            levels: self.def_levels.len(),
        }
    }

    pub(super) fn reset(&mut self, mark: Mark) {
        self.values.truncate(mark.values);
        self.def_levels.truncate(mark.levels);
    }

    pub(super) fn push_null(&mut self) -> Result<()> {
        if !self.nullable {
            return Err(Error::convert(&self.name, "required column has no value"));
        }
        self.def_levels.push(0);
        Ok(())
    }

    /// Records that a value was written for the current row.
    pub(super) fn push_present(&mut self) {
        self.def_levels.push(1);
    }

    /// Writes the buffered values to `writer` and clears the buffer.
    pub(super) fn flush(&mut self, writer: &mut ColumnWriter<'_>) -> Result<()> {
        let def_levels = self.nullable.then_some(&self.def_levels[..]);

        let written = match (&mut self.values, writer) {
            (Values::Boolean(values), ColumnWriter::BoolColumnWriter(w)) => {
                w.write_batch(values, def_levels, None)
            }
            (Values::Int32(values), ColumnWriter::Int32ColumnWriter(w)) => {
                w.write_batch(values, def_levels, None)
            }
            (Values::Int64(values), ColumnWriter::Int64ColumnWriter(w)) => {
                w.write_batch(values, def_levels, None)
            }
            (Values::Int96(values), ColumnWriter::Int96ColumnWriter(w)) => {
                w.write_batch(values, def_levels, None)
            }
            (Values::Float(values), ColumnWriter::FloatColumnWriter(w)) => {
                w.write_batch(values, def_levels, None)
            }
            (Values::Double(values), ColumnWriter::DoubleColumnWriter(w)) => {
                w.write_batch(values, def_levels, None)
            }
            (Values::Binary(values), ColumnWriter::ByteArrayColumnWriter(w)) => {
                w.write_batch(values, def_levels, None)
            }
            (Values::FixedLenByteArray(_, values), ColumnWriter::FixedLenByteArrayColumnWriter(w)) => {
                w.write_batch(values, def_levels, None)
            }
            _ => {
                return Err(Error::invalid_schema(format!(
                    "column `{}` does not match its parquet column writer",
                    self.name
                )))
            }
        };
        written.map_err(Error::driver_operation_failed)?;

        self.values.truncate(0);
        self.def_levels.clear();
        Ok(())
    }

    fn mismatch(&self, found: &str) -> Error {
        Error::convert(
            &self.name,
            format!("a {} column cannot hold a {found} value", self.values.kind()),
        )
    }
}

impl Values {
    fn len(&self) -> usize {
        match self {
            Values::Boolean(v) => v.len(),
            Values::Int32(v) => v.len(),
            Values::Int64(v) => v.len(),
            Values::Int96(v) => v.len(),
            Values::Float(v) => v.len(),
            Values::Double(v) => v.len(),
            Values::Binary(v) => v.len(),
            Values::FixedLenByteArray(_, v) => v.len(),
        }
    }

    fn truncate(&mut self, len: usize) {
        match self {
            Values::Boolean(v) => v.truncate(len),
            Values::Int32(v) => v.truncate(len),
            Values::Int64(v) => v.truncate(len),
            Values::Int96(v) => v.truncate(len),
            Values::Float(v) => v.truncate(len),
            Values::Double(v) => v.truncate(len),
            Values::Binary(v) => v.truncate(len),
            Values::FixedLenByteArray(_, v) => v.truncate(len),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Values::Boolean(_) => "BOOLEAN",
            Values::Int32(_) => "INT32",
            Values::Int64(_) => "INT64",
            Values::Int96(_) => "INT96",
            Values::Float(_) => "FLOAT",
            Values::Double(_) => "DOUBLE",
            Values::Binary(_) => "BINARY",
            Values::FixedLenByteArray(..) => "FIXED_LEN_BYTE_ARRAY",
        }
    }
}

impl RecordConsumer for ColumnBuffer {
    fn add_boolean(&mut self, value: bool) -> Result<()> {
        match &mut self.values {
            Values::Boolean(values) => {
                values.push(value);
                Ok(())
            }
            _ => Err(self.mismatch("BOOLEAN")),
        }
    }

    fn add_int32(&mut self, value: i32) -> Result<()> {
        match &mut self.values {
            Values::Int32(values) => {
                values.push(value);
                Ok(())
            }
            _ => Err(self.mismatch("INT32")),
        }
    }

    fn add_int64(&mut self, value: i64) -> Result<()> {
        match &mut self.values {
            Values::Int64(values) => {
                values.push(value);
                Ok(())
            }
            _ => Err(self.mismatch("INT64")),
        }
    }

    fn add_int96(&mut self, value: Int96) -> Result<()> {
        match &mut self.values {
            Values::Int96(values) => {
                let [a, b, c] = value.data();
                let mut int96 = ParquetInt96::new();
                int96.set_data(a, b, c);
                values.push(int96);
                Ok(())
            }
            _ => Err(self.mismatch("INT96")),
        }
    }

    fn add_float(&mut self, value: f32) -> Result<()> {
        match &mut self.values {
            Values::Float(values) => {
                values.push(value);
                Ok(())
            }
            _ => Err(self.mismatch("FLOAT")),
        }
    }

    fn add_double(&mut self, value: f64) -> Result<()> {
        match &mut self.values {
            Values::Double(values) => {
                values.push(value);
                Ok(())
            }
            _ => Err(self.mismatch("DOUBLE")),
        }
    }

    fn add_binary(&mut self, value: &[u8]) -> Result<()> {
        match &mut self.values {
            Values::Binary(values) => {
                values.push(ByteArray::from(value.to_vec()));
                Ok(())
            }
            _ => Err(self.mismatch("BINARY")),
        }
    }

    fn add_fixed_len_byte_array(&mut self, value: &[u8]) -> Result<()> {
        match &mut self.values {
            Values::FixedLenByteArray(len, values) if value.len() == *len => {
                values.push(FixedLenByteArray::from(ByteArray::from(value.to_vec())));
                Ok(())
            }
            Values::FixedLenByteArray(len, _) => Err(Error::convert(
                &self.name,
                format!("expected {len} bytes, found {}", value.len()),
            )),
            _ => Err(self.mismatch("FIXED_LEN_BYTE_ARRAY")),
        }
    }
}
