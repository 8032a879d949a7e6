use crate::{Connection, Sqlite, SqliteSink};
use jiff::tz::TimeZone;
use parqsql_core::{
    async_trait,
    driver::{RelationalSink, SinkFactory},
    Result,
};

/// Hands out one [`SqliteSink`] per writer.
///
/// File databases get a connection per sink. An in-memory database only
/// exists on the connection that created it, so its sinks share one.
#[derive(Debug, Clone)]
pub struct SqliteSinkFactory {
    connections: Connections,
    table: String,
    write_hint: Option<String>,
    time_zone: TimeZone,
}

#[derive(Debug, Clone)]
enum Connections {
    Shared(Connection),
    PerSink(Sqlite),
}

impl SqliteSinkFactory {
    pub fn new(driver: &Sqlite, table: impl Into<String>) -> Result<Self> {
        let connections = match driver {
            Sqlite::InMemory => Connections::Shared(driver.connect()?),
            Sqlite::File(_) => Connections::PerSink(driver.clone()),
        };
        Ok(Self::with_connections(connections, table.into()))
    }

    /// Every sink writes through `connection`.
    pub fn shared(connection: Connection, table: impl Into<String>) -> Self {
        Self::with_connections(Connections::Shared(connection), table.into())
    }

    fn with_connections(connections: Connections, table: String) -> Self {
        Self {
            connections,
            table,
            write_hint: None,
            time_zone: TimeZone::system(),
        }
    }

    /// Text placed between `INSERT` and `INTO`, such as `OR REPLACE`.
    pub fn write_hint(mut self, hint: Option<impl Into<String>>) -> Self {
        self.write_hint = hint.map(Into::into);
        self
    }

    /// Zone that timestamps are rendered in.
    pub fn time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl SinkFactory for SqliteSinkFactory {
    async fn acquire(&self, columns: &[String]) -> Result<Box<dyn RelationalSink>> {
        let connection = match &self.connections {
            Connections::Shared(connection) => connection.clone(),
            Connections::PerSink(driver) => driver.connect()?,
        };

        let sink = SqliteSink::new(
            connection,
            &self.table,
            columns,
            self.write_hint.as_deref(),
            self.time_zone.clone(),
        )?;

        Ok(Box::new(sink))
    }
}
