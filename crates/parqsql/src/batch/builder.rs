use super::BatchWriter;
use crate::{RecordBridge, WriterConfig};
use parqsql_core::{schema::ColumnarSchema, ConverterRegistry, Error, Result};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    config: WriterConfig,
    registry: Option<Arc<ConverterRegistry>>,
}

impl Builder {
    /// Starts from the settings of a loaded configuration.
    pub fn from_config(config: WriterConfig) -> Builder {
        Builder {
            config,
            registry: None,
        }
    }

    /// Rows added between two batch executions.
    pub fn batch_size(&mut self, batch_size: usize) -> &mut Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Sources written concurrently by [`BatchWriter::write_all`].
    pub fn parallelism(&mut self, parallelism: usize) -> &mut Self {
        self.config.parallelism = parallelism;
        self
    }

    /// Whether one failed source cancels the others.
    pub fn fail_fast(&mut self, fail_fast: bool) -> &mut Self {
        self.config.fail_fast = fail_fast;
        self
    }

    /// Registry used to decode timestamps. Defaults to the built-in
    /// converters in the system time zone.
    pub fn registry(&mut self, registry: Arc<ConverterRegistry>) -> &mut Self {
        self.registry = Some(registry);
        self
    }

    /// Builds a writer for the columns of `target`.
    pub fn build(&self, target: ColumnarSchema) -> Result<BatchWriter> {
        self.config.validate()?;

        if target.is_empty() {
            return Err(Error::invalid_schema(format!(
                "target `{}` has no columns",
                target.name
            )));
        }

        let registry = self
            .registry
            .clone()
            .unwrap_or_else(|| Arc::new(ConverterRegistry::new()));

        let columns = target
            .columns
            .iter()
            .map(|column| column.name.clone())
            .collect();

        Ok(BatchWriter {
            bridge: Arc::new(RecordBridge::new(registry)),
            target: Arc::new(target),
            columns,
            batch_size: self.config.batch_size,
            parallelism: self.config.parallelism,
            fail_fast: self.config.fail_fast,
        })
    }
}
