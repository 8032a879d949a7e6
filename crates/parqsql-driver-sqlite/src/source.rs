use crate::{quote, Connection, Value};
use parqsql_core::{
    async_trait,
    driver::RelationalSource,
    field::SourceRow,
    schema::ColumnDescriptor,
    Error, Result,
};
use jiff::tz::TimeZone;
use rusqlite::types::Value as SqlValue;
use std::{collections::VecDeque, sync::Arc};

/// Rows fetched per query unless configured otherwise.
pub const DEFAULT_FETCH_SIZE: usize = 1000;

/// Reads a table page by page in rowid order.
///
/// Each page is one query of at most `fetch_size` rows that resumes after the
/// last rowid seen, so the connection is never held between pages. Tables
/// declared `WITHOUT ROWID` are not supported.
#[derive(Debug)]
pub struct SqliteSource {
    connection: Connection,
    table: String,
    columns: Arc<[ColumnDescriptor]>,
    sql: String,
    fetch_size: usize,
    time_zone: TimeZone,
    last_rowid: i64,
    buffer: VecDeque<SourceRow>,
    exhausted: bool,
}

impl SqliteSource {
    /// Opens a source over every column of `table`, described from the
    /// table's declared types.
    pub fn open(connection: &Connection, table: &str) -> Result<Self> {
        let columns = connection.with(|conn| {
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote(table)))?;
            let rows = stmt.query_map([], |row| {
                let name: String = row.get("name")?;
                let declared: Option<String> = row.get("type")?;
                let not_null: bool = row.get("notnull")?;
                Ok(crate::describe_column(
                    &name,
                    declared.as_deref().unwrap_or_default(),
                    not_null,
                ))
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })?;

        if columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "table `{table}` does not exist or has no columns"
            )));
        }

        let select = columns
            .iter()
            .map(|column| quote(&column.name))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "SELECT rowid, {select} FROM {} WHERE rowid > ?1 ORDER BY rowid LIMIT ?2",
            quote(table)
        );

        log::debug!("opened sqlite source `{table}` with {} columns", columns.len());

        Ok(Self {
            connection: connection.clone(),
            table: table.to_string(),
            columns: columns.into(),
            sql,
            fetch_size: DEFAULT_FETCH_SIZE,
            time_zone: TimeZone::system(),
            last_rowid: i64::MIN,
            buffer: VecDeque::new(),
            exhausted: false,
        })
    }

    /// Sets the number of rows fetched per query. Zero is treated as one.
    pub fn fetch_size(mut self, fetch_size: usize) -> Self {
        self.fetch_size = fetch_size.max(1);
        self
    }

    /// Sets the zone that timestamp text is read in.
    pub fn time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn fetch_page(&mut self) -> Result<()> {
        let conn = self.connection.lock()?;
        let mut stmt = conn
            .prepare_cached(&self.sql)
            .map_err(Error::driver_operation_failed)?;

        let mut rows = stmt
            .query(rusqlite::params![self.last_rowid, self.fetch_size as i64])
            .map_err(Error::driver_operation_failed)?;

        let mut fetched = 0;

        while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
            self.last_rowid = row.get(0).map_err(Error::driver_operation_failed)?;

            let mut values = Vec::with_capacity(self.columns.len());
            for (index, column) in self.columns.iter().enumerate() {
                let value: SqlValue = row
                    .get(index + 1)
                    .map_err(Error::driver_operation_failed)?;
                values.push(Value::from_sql(value, column, &self.time_zone)?.into_inner());
            }

            self.buffer
                .push_back(SourceRow::new(self.columns.clone(), values));
            fetched += 1;
        }

        log::debug!("fetched {fetched} rows from `{}`", self.table);

        if fetched < self.fetch_size {
            self.exhausted = true;
        }

        Ok(())
    }
}

#[async_trait]
impl RelationalSource for SqliteSource {
    fn columns(&self) -> Arc<[ColumnDescriptor]> {
        self.columns.clone()
    }

    async fn next_row(&mut self) -> Result<Option<SourceRow>> {
        if self.buffer.is_empty() && !self.exhausted {
            self.fetch_page()?;
        }

        Ok(self.buffer.pop_front())
    }
}
