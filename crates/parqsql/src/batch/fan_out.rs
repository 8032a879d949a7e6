use super::{cancelled, BatchWriter, WriteStats};
use parqsql_core::{
    driver::{ColumnarSource, SinkFactory},
    Error, Result,
};
use std::{collections::HashMap, sync::Arc};
use tokio::{
    sync::{watch, Semaphore},
    task::JoinSet,
};

/// Result of writing one source of a [`BatchWriter::write_all`] call.
#[derive(Debug)]
pub struct SourceOutcome {
    /// Name reported by the source
    pub source: String,
    pub result: Result<WriteStats>,
}

impl SourceOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl BatchWriter {
    /// Writes every source, each through its own sink from `factory`.
    ///
    /// Up to `parallelism` sources are written at once. Returns one outcome
    /// per source, in the order the sources were given. When fail-fast is
    /// set, the first failure cancels the sources still being written: each
    /// stops before its next read, closes its sink, and reports the
    /// cancellation. Batches it already executed stay written.
    pub async fn write_all(
        &self,
        sources: Vec<Box<dyn ColumnarSource>>,
        factory: Arc<dyn SinkFactory>,
    ) -> Vec<SourceOutcome> {
        if self.parallelism <= 1 {
            self.write_sequential(sources, &*factory).await
        } else {
            self.write_parallel(sources, factory).await
        }
    }

    async fn write_sequential(
        &self,
        sources: Vec<Box<dyn ColumnarSource>>,
        factory: &dyn SinkFactory,
    ) -> Vec<SourceOutcome> {
        let mut outcomes = Vec::with_capacity(sources.len());
        let mut failed = false;

        for mut source in sources {
            let name = source.name().to_string();

            let result = if failed && self.fail_fast {
                Err(Error::cancelled(&name))
            } else {
                let result = self.write_scoped(&mut *source, factory).await;
                if let Err(err) = &result {
                    log::warn!("writing `{name}` failed: {err}");
                    failed = true;
                }
                result
            };

            outcomes.push(SourceOutcome {
                source: name,
                result,
            });
        }

        outcomes
    }

    async fn write_parallel(
        &self,
        sources: Vec<Box<dyn ColumnarSource>>,
        factory: Arc<dyn SinkFactory>,
    ) -> Vec<SourceOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.parallelism));
        let (cancel, cancel_rx) = watch::channel(false);
        let mut tasks = JoinSet::new();
        let mut names = Vec::with_capacity(sources.len());
        let mut task_index = HashMap::new();

        for (index, mut source) in sources.into_iter().enumerate() {
            names.push(source.name().to_string());

            let writer = self.clone();
            let factory = factory.clone();
            let semaphore = semaphore.clone();
            let mut cancel_rx = cancel_rx.clone();

            let handle = tasks.spawn(async move {
                let permit = tokio::select! {
                    biased;
                    _ = cancelled(&mut cancel_rx) => None,
                    permit = semaphore.acquire_owned() => permit.ok(),
                };
                let Some(_permit) = permit else {
                    return Err(Error::cancelled(source.name()));
                };

                writer
                    .write_scoped_until(&mut *source, &*factory, Some(cancel_rx))
                    .await
            });
            task_index.insert(handle.id(), index);
        }

        let mut results: Vec<Option<Result<WriteStats>>> = names.iter().map(|_| None).collect();

        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(err) => (err.id(), Err(parqsql_core::err!("writer task panicked: {err}"))),
            };

            let Some(&index) = task_index.get(&id) else {
                continue;
            };

            if let Err(err) = &result {
                if !err.is_cancelled() {
                    log::warn!("writing `{}` failed: {err}", names[index]);
                }
                if self.fail_fast {
                    // running writers stop at their next read and close their sinks
                    cancel.send_replace(true);
                }
            }

            results[index] = Some(result);
        }

        names
            .into_iter()
            .zip(results)
            .map(|(source, result)| {
                let result = result.unwrap_or_else(|| Err(Error::cancelled(&source)));
                SourceOutcome { source, result }
            })
            .collect()
    }
}
