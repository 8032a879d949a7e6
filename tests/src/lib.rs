//! Shared fixtures for the end-to-end scenarios: a scratch directory, a
//! SQLite database inside it, and helpers to move tables through parquet.

use parqsql::{ColumnarSchema, ConverterRegistry, Export, Result};
use parqsql_driver_sqlite::{Connection, Sqlite, SqliteSource};
use parqsql_parquet::ParquetSink;
use rusqlite::types::Value as SqlValue;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::TempDir;

/// The users table every scenario starts from.
pub const USERS: &str = "
    CREATE TABLE users (username VARCHAR(32) NOT NULL, value INT, comment VARCHAR(64));
    INSERT INTO users VALUES ('Robert', 7, 'Testing');
    INSERT INTO users VALUES ('Paul', 4, NULL);
    INSERT INTO users VALUES ('Patrick', NULL, 'Null int!');
";

/// An empty table shaped like `users`.
pub fn users_copy(table: &str) -> String {
    format!("CREATE TABLE {table} (username VARCHAR(32) NOT NULL, value INT, comment VARCHAR(64))")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Fixture {
    dir: TempDir,
    driver: Sqlite,
    pub sqlite: Connection,
}

impl Fixture {
    /// A fresh directory holding a file database with the users table.
    pub fn new() -> Fixture {
        init_logging();

        let dir = tempfile::tempdir().unwrap();
        let driver = Sqlite::open(dir.path().join("db.sqlite"));
        let sqlite = driver.connect().unwrap();
        sqlite.execute_batch(USERS).unwrap();

        Fixture {
            dir,
            driver,
            sqlite,
        }
    }

    pub fn driver(&self) -> &Sqlite {
        &self.driver
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Every row of `sql`, as stored.
    pub fn query(&self, sql: &str) -> Vec<Vec<SqlValue>> {
        query(&self.sqlite, sql)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Fixture::new()
    }
}

pub fn query(connection: &Connection, sql: &str) -> Vec<Vec<SqlValue>> {
    connection
        .with(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let width = stmt.column_count();
            let rows = stmt.query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, SqlValue>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?;
            rows.collect()
        })
        .unwrap()
}

/// Exports `table` to a parquet file at `path`, returning the schema it was
/// written with and the number of rows.
pub async fn export_table(
    connection: &Connection,
    table: &str,
    path: &Path,
    registry: Arc<ConverterRegistry>,
) -> Result<(ColumnarSchema, u64)> {
    let mut source = SqliteSource::open(connection, table)?
        .fetch_size(2)
        .time_zone(registry.time_zone().clone());

    let export = Export::new(registry);
    let schema = export.derive_schema(table, &source)?;

    let mut sink = ParquetSink::create(path, schema.clone())?;
    let rows = export.run(&mut source, &mut sink).await?;

    Ok((schema, rows))
}
