use parqsql_core::{Error, Result};
use serde::Deserialize;

/// Default number of rows per executed batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Writer settings, as they appear in a host's configuration file.
///
/// ```
/// let config: parqsql::WriterConfig =
///     serde_json::from_str(r#"{ "batch_size": 500, "write_hint": "OR REPLACE" }"#).unwrap();
/// assert_eq!(config.batch_size, 500);
/// assert_eq!(config.parallelism, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Rows added to a sink between two batch executions
    pub batch_size: usize,

    /// Number of sources written concurrently
    pub parallelism: usize,

    /// Text placed between `INSERT` and `INTO`, for example `OR REPLACE`
    pub write_hint: Option<String>,

    /// Cancel the remaining sources as soon as one fails
    pub fail_fast: bool,
}

impl WriterConfig {
    pub fn new() -> WriterConfig {
        WriterConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            parallelism: 1,
            write_hint: None,
            fail_fast: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::invalid_configuration("batch size must be at least 1"));
        }

        if self.parallelism == 0 {
            return Err(Error::invalid_configuration("parallelism must be at least 1"));
        }

        Ok(())
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig::new()
    }
}
