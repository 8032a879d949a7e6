use crate::{quote, value::render_timestamp, Connection, Value};
use bigdecimal::BigDecimal;
use jiff::{civil, tz::TimeZone, Timestamp};
use parqsql_core::{
    async_trait,
    driver::{RelationalSink, SoftErrors},
    schema::SqlType,
    Error, Result, Value as CoreValue,
};
use std::mem;

/// Builds `INSERT <hint> INTO table (columns) VALUES (?, ..)`.
///
/// The hint is placed verbatim between `INSERT` and `INTO`, e.g. `OR
/// REPLACE`.
pub fn insert_statement(table: &str, columns: &[String], hint: Option<&str>) -> Result<String> {
    if columns.is_empty() {
        return Err(Error::invalid_schema(format!(
            "cannot insert into `{table}` without columns"
        )));
    }

    let names = columns.iter().map(|c| quote(c)).collect::<Vec<_>>().join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");

    let hint = match hint.map(str::trim) {
        Some(hint) if !hint.is_empty() => format!(" {hint}"),
        _ => String::new(),
    };

    Ok(format!(
        "INSERT{hint} INTO {} ({names}) VALUES ({placeholders})",
        quote(table)
    ))
}

/// A prepared insert that buffers parameter rows and writes them in one
/// transaction per batch.
#[derive(Debug)]
pub struct SqliteSink {
    connection: Connection,
    sql: String,
    params: Vec<Value>,
    pending: Vec<Vec<Value>>,
    errors: SoftErrors,
    time_zone: TimeZone,
}

impl SqliteSink {
    pub fn new(
        connection: Connection,
        table: &str,
        columns: &[String],
        hint: Option<&str>,
        time_zone: TimeZone,
    ) -> Result<Self> {
        let sql = insert_statement(table, columns, hint)?;

        // Prepare once up front so a bad table or column fails here
        connection.with(|conn| conn.prepare_cached(&sql).map(drop))?;

        log::debug!("prepared `{sql}`");

        Ok(Self {
            connection,
            sql,
            params: vec![Value::from(CoreValue::Null); columns.len()],
            pending: vec![],
            errors: SoftErrors::new(),
            time_zone,
        })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Rows added to the batch and not yet executed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn set(&mut self, index: usize, value: CoreValue) {
        let len = self.params.len();
        match index.checked_sub(1).and_then(|i| self.params.get_mut(i)) {
            Some(slot) => *slot = Value::from(value),
            None => self
                .errors
                .push(index, format!("no such parameter, the statement has {len}")),
        }
    }

    fn execute_pending(&mut self) -> Result<usize> {
        let rows = mem::take(&mut self.pending);
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.connection.lock()?;
        let tx = conn.transaction().map_err(Error::driver_operation_failed)?;
        {
            let mut stmt = tx
                .prepare_cached(&self.sql)
                .map_err(Error::driver_operation_failed)?;
            for row in &rows {
                stmt.execute(rusqlite::params_from_iter(row.iter()))
                    .map_err(Error::driver_operation_failed)?;
            }
        }
        tx.commit().map_err(Error::driver_operation_failed)?;

        Ok(rows.len())
    }
}

#[async_trait]
impl RelationalSink for SqliteSink {
    fn set_boolean(&mut self, index: usize, value: bool) {
        self.set(index, CoreValue::Bool(value));
    }

    fn set_byte(&mut self, index: usize, value: i8) {
        self.set(index, CoreValue::I8(value));
    }

    fn set_short(&mut self, index: usize, value: i16) {
        self.set(index, CoreValue::I16(value));
    }

    fn set_int(&mut self, index: usize, value: i32) {
        self.set(index, CoreValue::I32(value));
    }

    fn set_long(&mut self, index: usize, value: i64) {
        self.set(index, CoreValue::I64(value));
    }

    fn set_float(&mut self, index: usize, value: f32) {
        self.set(index, CoreValue::F32(value));
    }

    fn set_double(&mut self, index: usize, value: f64) {
        self.set(index, CoreValue::F64(value));
    }

    fn set_decimal(&mut self, index: usize, value: &BigDecimal) {
        self.set(index, CoreValue::Decimal(value.clone()));
    }

    fn set_string(&mut self, index: usize, value: &str) {
        self.set(index, CoreValue::String(value.to_string()));
    }

    fn set_bytes(&mut self, index: usize, value: &[u8]) {
        self.set(index, CoreValue::Bytes(value.to_vec()));
    }

    fn set_date(&mut self, index: usize, value: civil::Date) {
        self.set(index, CoreValue::Date(value));
    }

    fn set_timestamp(&mut self, index: usize, value: Timestamp) {
        let text = render_timestamp(value, &self.time_zone);
        self.set(index, CoreValue::String(text));
    }

    fn set_object(&mut self, index: usize, value: &CoreValue) {
        match value {
            CoreValue::Timestamp(ts) => self.set_timestamp(index, *ts),
            CoreValue::Int96(v) => match v.to_timestamp() {
                Ok(ts) => self.set_timestamp(index, ts),
                Err(err) => self.errors.push(index, err),
            },
            value => self.set(index, value.clone()),
        }
    }

    fn set_null(&mut self, index: usize, _ty: SqlType) {
        self.set(index, CoreValue::Null);
    }

    fn add_batch(&mut self) -> Result<()> {
        let len = self.params.len();
        let row = mem::replace(&mut self.params, vec![Value::from(CoreValue::Null); len]);
        self.errors.take()?;
        self.pending.push(row);
        Ok(())
    }

    async fn execute_batch(&mut self) -> Result<usize> {
        self.execute_pending()
    }

    async fn close(&mut self) -> Result<()> {
        if !self.pending.is_empty() {
            log::debug!("discarding {} unexecuted rows", self.pending.len());
            self.pending.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn insert_without_hint() {
        let sql = insert_statement("users", &columns(&["name", "age"]), None).unwrap();
        assert_eq!(sql, "INSERT INTO \"users\" (\"name\", \"age\") VALUES (?, ?)");
    }

    #[test]
    fn insert_with_hint() {
        let sql = insert_statement("users", &columns(&["name"]), Some("OR REPLACE")).unwrap();
        assert_eq!(sql, "INSERT OR REPLACE INTO \"users\" (\"name\") VALUES (?)");

        let sql = insert_statement("users", &columns(&["name"]), Some("  ")).unwrap();
        assert_eq!(sql, "INSERT INTO \"users\" (\"name\") VALUES (?)");
    }

    #[test]
    fn insert_requires_columns() {
        let err = insert_statement("users", &[], None).unwrap_err();
        assert!(err.is_invalid_schema());
    }
}
