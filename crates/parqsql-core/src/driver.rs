//! Interfaces to the storage collaborators on each side of the bridge.
//!
//! The bridge never opens files or connections itself. Relational drivers
//! implement [`RelationalSource`], [`RelationalSink`] and [`SinkFactory`];
//! columnar storage implements [`ColumnarSource`], [`ColumnarSink`] and
//! [`RecordConsumer`].

mod soft_errors;
pub use soft_errors::SoftErrors;

use crate::{
    async_trait,
    field::{Record, SourceRow},
    schema::{ColumnDescriptor, ColumnarSchema, SqlType},
    value::Int96,
    Result, Value,
};
use bigdecimal::BigDecimal;
use jiff::{civil, Timestamp};
use std::{fmt::Debug, sync::Arc};

/// Row-oriented query results.
#[async_trait]
pub trait RelationalSource: Send {
    /// Metadata for every result column, in column order.
    fn columns(&self) -> Arc<[ColumnDescriptor]>;

    /// The next row, or `None` once the results are exhausted.
    async fn next_row(&mut self) -> Result<Option<SourceRow>>;
}

/// A prepared, batched write statement.
///
/// Parameters are 1-based. Setters never fail: a sink that cannot bind a
/// value records the failure (see [`SoftErrors`]) and reports every failure
/// of the pending row from [`add_batch`](RelationalSink::add_batch).
#[async_trait]
pub trait RelationalSink: Send {
    fn set_boolean(&mut self, index: usize, value: bool);

    fn set_byte(&mut self, index: usize, value: i8);

    fn set_short(&mut self, index: usize, value: i16);

    fn set_int(&mut self, index: usize, value: i32);

    fn set_long(&mut self, index: usize, value: i64);

    fn set_float(&mut self, index: usize, value: f32);

    fn set_double(&mut self, index: usize, value: f64);

    fn set_decimal(&mut self, index: usize, value: &BigDecimal);

    fn set_string(&mut self, index: usize, value: &str);

    fn set_bytes(&mut self, index: usize, value: &[u8]);

    fn set_date(&mut self, index: usize, value: civil::Date);

    fn set_timestamp(&mut self, index: usize, value: Timestamp);

    /// Binds a value of any kind, letting the driver pick the storage type.
    fn set_object(&mut self, index: usize, value: &Value);

    fn set_null(&mut self, index: usize, ty: SqlType);

    /// Moves the bound parameters into the pending batch.
    ///
    /// Fails with a sink-apply error if any setter failed since the previous
    /// call. The failed row is discarded either way.
    fn add_batch(&mut self) -> Result<()>;

    /// Writes the pending batch, returning the number of rows written.
    async fn execute_batch(&mut self) -> Result<usize>;

    /// Releases the sink. Rows added but not executed are discarded.
    async fn close(&mut self) -> Result<()>;
}

/// Hands out sinks to writer tasks, one per source.
#[async_trait]
pub trait SinkFactory: Debug + Send + Sync + 'static {
    async fn acquire(&self, columns: &[String]) -> Result<Box<dyn RelationalSink>>;
}

/// Record-at-a-time reader over columnar storage.
#[async_trait]
pub trait ColumnarSource: Send {
    /// Name used in logs and per-source outcomes, such as a file path.
    fn name(&self) -> &str {
        &self.schema().name
    }

    fn schema(&self) -> &ColumnarSchema;

    /// The next record, or `None` at end of data.
    ///
    /// Values are at the physical level: an annotated column yields the value
    /// of its physical kind, decoded later by the read path.
    async fn read_next(&mut self) -> Result<Option<Record>>;
}

/// Record-at-a-time writer over columnar storage with a fixed schema.
#[async_trait]
pub trait ColumnarSink: Send {
    fn schema(&self) -> &ColumnarSchema;

    async fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Flushes buffered records and finalizes the output.
    async fn finish(&mut self) -> Result<()>;
}

/// Receives the physical values of one column.
///
/// Each method fails unless the implementation accepts that physical kind.
pub trait RecordConsumer {
    fn add_boolean(&mut self, _value: bool) -> Result<()> {
        Err(err!("consumer does not accept BOOLEAN values"))
    }

    fn add_int32(&mut self, _value: i32) -> Result<()> {
        Err(err!("consumer does not accept INT32 values"))
    }

    fn add_int64(&mut self, _value: i64) -> Result<()> {
        Err(err!("consumer does not accept INT64 values"))
    }

    fn add_int96(&mut self, _value: Int96) -> Result<()> {
        Err(err!("consumer does not accept INT96 values"))
    }

    fn add_float(&mut self, _value: f32) -> Result<()> {
        Err(err!("consumer does not accept FLOAT values"))
    }

    fn add_double(&mut self, _value: f64) -> Result<()> {
        Err(err!("consumer does not accept DOUBLE values"))
    }

    fn add_binary(&mut self, _value: &[u8]) -> Result<()> {
        Err(err!("consumer does not accept BINARY values"))
    }

    fn add_fixed_len_byte_array(&mut self, _value: &[u8]) -> Result<()> {
        Err(err!("consumer does not accept FIXED_LEN_BYTE_ARRAY values"))
    }
}

/// Collects every value as a [`Value`]. Mostly useful in tests.
impl RecordConsumer for Vec<Value> {
    fn add_boolean(&mut self, value: bool) -> Result<()> {
        self.push(Value::Bool(value));
        Ok(())
    }

    fn add_int32(&mut self, value: i32) -> Result<()> {
        self.push(Value::I32(value));
        Ok(())
    }

    fn add_int64(&mut self, value: i64) -> Result<()> {
        self.push(Value::I64(value));
        Ok(())
    }

    fn add_int96(&mut self, value: Int96) -> Result<()> {
        self.push(Value::Int96(value));
        Ok(())
    }

    fn add_float(&mut self, value: f32) -> Result<()> {
        self.push(Value::F32(value));
        Ok(())
    }

    fn add_double(&mut self, value: f64) -> Result<()> {
        self.push(Value::F64(value));
        Ok(())
    }

    fn add_binary(&mut self, value: &[u8]) -> Result<()> {
        self.push(Value::Bytes(value.to_vec()));
        Ok(())
    }

    fn add_fixed_len_byte_array(&mut self, value: &[u8]) -> Result<()> {
        self.push(Value::Bytes(value.to_vec()));
        Ok(())
    }
}
