#![allow(dead_code)]

use bigdecimal::BigDecimal;
use parqsql::{
    driver::{ColumnarSource, RelationalSink, SinkFactory, SoftErrors},
    schema::ColumnarSchema,
    ColumnarOp, Field, Record, Result, SqlType, Value,
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a record of physical values.
pub fn record(fields: &[(&str, Value, ColumnarOp)]) -> Record {
    fields
        .iter()
        .map(|(name, value, op)| Field::new(*name, value.clone(), *op))
        .collect()
}

pub fn text(s: &str) -> Value {
    Value::Bytes(s.as_bytes().to_vec())
}

/// In-memory columnar source.
pub struct MemorySource {
    pub name: String,
    pub schema: ColumnarSchema,
    pub records: VecDeque<Record>,

    /// Fail instead of returning the record at this position
    pub fail_at: Option<usize>,

    /// Pause before every read
    pub delay: Option<Duration>,

    read: usize,
}

impl MemorySource {
    pub fn new(name: &str, schema: ColumnarSchema, records: Vec<Record>) -> MemorySource {
        MemorySource {
            name: name.to_string(),
            schema,
            records: records.into(),
            fail_at: None,
            delay: None,
            read: 0,
        }
    }

    pub fn failing_at(mut self, position: usize) -> Self {
        self.fail_at = Some(position);
        self
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait::async_trait]
impl ColumnarSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &ColumnarSchema {
        &self.schema
    }

    async fn read_next(&mut self) -> Result<Option<Record>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_at == Some(self.read) {
            parqsql::bail!("read failure in `{}` at record {}", self.name, self.read);
        }

        self.read += 1;
        Ok(self.records.pop_front())
    }
}

/// What every sink of a test wrote.
#[derive(Debug, Default)]
pub struct SinkLog {
    /// Executed rows, each parameter rendered as `setter value`
    pub rows: Vec<Vec<String>>,

    /// Size of each executed batch
    pub batches: Vec<usize>,

    pub acquired: usize,
    pub closed: usize,
}

/// Sink recording every call into a shared log.
pub struct RecordingSink {
    log: Arc<Mutex<SinkLog>>,
    params: Vec<(usize, String)>,
    pending: Vec<Vec<String>>,
    errors: SoftErrors,

    /// Reject strings longer than this
    pub max_len: Option<usize>,
}

impl RecordingSink {
    pub fn new(log: Arc<Mutex<SinkLog>>) -> RecordingSink {
        RecordingSink {
            log,
            params: vec![],
            pending: vec![],
            errors: SoftErrors::new(),
            max_len: None,
        }
    }

    fn set(&mut self, index: usize, param: String) {
        self.params.push((index, param));
    }
}

#[async_trait::async_trait]
impl RelationalSink for RecordingSink {
    fn set_boolean(&mut self, index: usize, value: bool) {
        self.set(index, format!("boolean {value}"));
    }

    fn set_byte(&mut self, index: usize, value: i8) {
        self.set(index, format!("byte {value}"));
    }

    fn set_short(&mut self, index: usize, value: i16) {
        self.set(index, format!("short {value}"));
    }

    fn set_int(&mut self, index: usize, value: i32) {
        self.set(index, format!("int {value}"));
    }

    fn set_long(&mut self, index: usize, value: i64) {
        self.set(index, format!("long {value}"));
    }

    fn set_float(&mut self, index: usize, value: f32) {
        self.set(index, format!("float {value}"));
    }

    fn set_double(&mut self, index: usize, value: f64) {
        self.set(index, format!("double {value}"));
    }

    fn set_decimal(&mut self, index: usize, value: &BigDecimal) {
        self.set(index, format!("decimal {value}"));
    }

    fn set_string(&mut self, index: usize, value: &str) {
        if let Some(max) = self.max_len {
            if value.len() > max {
                self.errors.push(index, format!("`{value}` is longer than {max}"));
                return;
            }
        }
        self.set(index, format!("string {value}"));
    }

    fn set_bytes(&mut self, index: usize, value: &[u8]) {
        self.set(index, format!("bytes {value:?}"));
    }

    fn set_date(&mut self, index: usize, value: jiff::civil::Date) {
        self.set(index, format!("date {value}"));
    }

    fn set_timestamp(&mut self, index: usize, value: jiff::Timestamp) {
        self.set(index, format!("timestamp {value}"));
    }

    fn set_object(&mut self, index: usize, value: &Value) {
        self.set(index, format!("object {value:?}"));
    }

    fn set_null(&mut self, index: usize, ty: SqlType) {
        self.set(index, format!("null {ty}"));
    }

    fn add_batch(&mut self) -> Result<()> {
        let mut params = std::mem::take(&mut self.params);
        self.errors.take()?;
        params.sort_by_key(|(index, _)| *index);
        self.pending
            .push(params.into_iter().map(|(_, param)| param).collect());
        Ok(())
    }

    async fn execute_batch(&mut self) -> Result<usize> {
        let rows = std::mem::take(&mut self.pending);
        let count = rows.len();
        let mut log = self.log.lock().unwrap();
        log.batches.push(count);
        log.rows.extend(rows);
        Ok(count)
    }

    async fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().closed += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingFactory {
    pub log: Arc<Mutex<SinkLog>>,
}

#[async_trait::async_trait]
impl SinkFactory for RecordingFactory {
    async fn acquire(&self, _columns: &[String]) -> Result<Box<dyn RelationalSink>> {
        self.log.lock().unwrap().acquired += 1;
        Ok(Box::new(RecordingSink::new(self.log.clone())))
    }
}
