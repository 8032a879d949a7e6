mod column;
use column::ColumnBuffer;

use parqsql_core::{
    async_trait, bail, driver::ColumnarSink, ColumnarOp, ColumnarSchema, Error, Record, Result,
};
use parquet::{
    basic::Compression,
    file::{properties::WriterProperties, writer::SerializedFileWriter},
};
use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Rows buffered before a row group is written, unless configured otherwise.
pub const DEFAULT_ROW_GROUP_SIZE: usize = 8192;

/// Writes records to a parquet file.
///
/// Records are buffered column by column and written one row group at a
/// time. The file is only complete once [`finish`](ColumnarSink::finish)
/// returns.
pub struct ParquetSink {
    path: PathBuf,
    schema: ColumnarSchema,
    writer: Option<SerializedFileWriter<File>>,
    columns: Vec<ColumnBuffer>,
    row_group_size: usize,
    buffered: usize,
    written: u64,
}

impl ParquetSink {
    /// Creates `path` with snappy-compressed columns.
    pub fn create(path: impl AsRef<Path>, schema: ColumnarSchema) -> Result<Self> {
        let properties = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        Self::with_properties(path, schema, properties)
    }

    pub fn with_properties(
        path: impl AsRef<Path>,
        schema: ColumnarSchema,
        properties: WriterProperties,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let message = crate::schema::to_parquet(&schema)?;

        let file = File::create(&path)?;
        let writer = SerializedFileWriter::new(file, message, Arc::new(properties))
            .map_err(Error::driver_operation_failed)?;

        let columns = schema.columns.iter().map(ColumnBuffer::new).collect();

        Ok(Self {
            path,
            schema,
            writer: Some(writer),
            columns,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            buffered: 0,
            written: 0,
        })
    }

    /// Sets the number of rows per row group. Zero is treated as one.
    pub fn row_group_size(mut self, row_group_size: usize) -> Self {
        self.row_group_size = row_group_size.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written to completed row groups so far.
    pub fn rows_written(&self) -> u64 {
        self.written
    }

    fn write(&mut self, record: &Record) -> Result<()> {
        if self.writer.is_none() {
            bail!("parquet file `{}` is already finished", self.path.display());
        }

        for field in record.iter() {
            if self.schema.column(&field.name).is_none() {
                return Err(Error::convert(
                    &field.name,
                    format!("not a column of `{}`", self.schema.name),
                ));
            }
        }

        let marks: Vec<_> = self.columns.iter().map(ColumnBuffer::mark).collect();

        if let Err(err) = self.buffer(record) {
            for (column, mark) in self.columns.iter_mut().zip(marks) {
                column.reset(mark);
            }
            return Err(err);
        }

        self.buffered += 1;

        if self.buffered >= self.row_group_size {
            self.flush()?;
        }

        Ok(())
    }

    fn buffer(&mut self, record: &Record) -> Result<()> {
        for (column, buffer) in self.schema.columns.iter().zip(&mut self.columns) {
            match record.get(&column.name) {
                Some(field) if field.op != ColumnarOp::Skip && !field.is_null() => {
                    field.apply(buffer)?;
                    buffer.push_present();
                }
                _ => buffer.push_null()?,
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffered == 0 {
            return Ok(());
        }

        let Some(writer) = self.writer.as_mut() else {
            bail!("parquet file `{}` is already finished", self.path.display());
        };

        let mut row_group = writer
            .next_row_group()
            .map_err(Error::driver_operation_failed)?;
        let mut buffers = self.columns.iter_mut();

        while let Some(mut column) = row_group
            .next_column()
            .map_err(Error::driver_operation_failed)?
        {
            let Some(buffer) = buffers.next() else {
                bail!("parquet writer has more columns than `{}`", self.schema.name);
            };
            buffer.flush(column.untyped())?;
            column.close().map_err(Error::driver_operation_failed)?;
        }

        row_group.close().map_err(Error::driver_operation_failed)?;

        log::debug!(
            "wrote row group of {} rows to `{}`",
            self.buffered,
            self.path.display()
        );

        self.written += self.buffered as u64;
        self.buffered = 0;
        Ok(())
    }
}

impl core::fmt::Debug for ParquetSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParquetSink")
            .field("path", &self.path)
            .field("schema", &self.schema.name)
            .field("buffered", &self.buffered)
            .field("written", &self.written)
            .field("finished", &self.writer.is_none())
            .finish()
    }
}

#[async_trait]
impl ColumnarSink for ParquetSink {
    fn schema(&self) -> &ColumnarSchema {
        &self.schema
    }

    async fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write(record)
    }

    async fn finish(&mut self) -> Result<()> {
        self.flush()?;

        if let Some(writer) = self.writer.take() {
            writer.close().map_err(Error::driver_operation_failed)?;
            log::info!(
                "finished `{}` with {} rows",
                self.path.display(),
                self.written
            );
        }

        Ok(())
    }
}
