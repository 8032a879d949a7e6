use crate::{RecordBridge, SchemaBridge};
use parqsql_core::{
    driver::{ColumnarSink, RelationalSource},
    schema::ColumnarSchema,
    ConverterRegistry, Result,
};
use std::sync::Arc;

/// Copies relational query results into columnar storage.
#[derive(Debug, Clone)]
pub struct Export {
    schema: SchemaBridge,
    records: RecordBridge,
}

impl Export {
    pub fn new(registry: Arc<ConverterRegistry>) -> Export {
        Export {
            schema: SchemaBridge::new(registry.clone()),
            records: RecordBridge::new(registry),
        }
    }

    /// The columnar schema `source` will be written with.
    pub fn derive_schema(&self, name: &str, source: &dyn RelationalSource) -> Result<ColumnarSchema> {
        self.schema.derive_schema(name, &source.columns())
    }

    /// Writes every row of `source` to `sink`, then finishes the sink.
    /// Returns the number of rows written.
    pub async fn run(
        &self,
        source: &mut dyn RelationalSource,
        sink: &mut dyn ColumnarSink,
    ) -> Result<u64> {
        let mut rows = 0;

        while let Some(row) = source.next_row().await? {
            let record = self.records.convert_row(&row)?;
            sink.write_record(&record).await?;
            rows += 1;
        }

        sink.finish().await?;
        log::info!("exported {rows} rows to `{}`", sink.schema().name);
        Ok(rows)
    }
}
