mod decl;
pub use decl::describe_column;

mod factory;
pub use factory::SqliteSinkFactory;

mod sink;
pub use sink::{insert_statement, SqliteSink};

mod source;
pub use source::{SqliteSource, DEFAULT_FETCH_SIZE};

mod value;
pub(crate) use value::Value;

use parqsql_core::{Error, Result};
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use url::Url;

/// How long a connection waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a connection URL such as
    /// `sqlite::memory:` or `sqlite:/var/data/app.db`
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_configuration(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    /// Opens a connection. Every in-memory connection is a fresh database.
    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

/// A SQLite connection shared by the sources and sinks created from it.
#[derive(Debug, Clone)]
pub struct Connection {
    connection: Arc<Mutex<RusqliteConnection>>,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self::wrap(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(Error::driver_operation_failed)?;
        Ok(Self::wrap(connection))
    }

    fn wrap(connection: RusqliteConnection) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
        }
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, RusqliteConnection>> {
        self.connection
            .lock()
            .map_err(|_| parqsql_core::err!("sqlite connection lock poisoned"))
    }

    /// Runs one or more `;`-separated statements with no parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.lock()?
            .execute_batch(sql)
            .map_err(Error::driver_operation_failed)
    }

    /// Runs `f` with exclusive access to the underlying rusqlite connection.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut RusqliteConnection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        f(&mut *self.lock()?).map_err(Error::driver_operation_failed)
    }
}

/// Quotes an identifier for use in SQL text.
pub(crate) fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
