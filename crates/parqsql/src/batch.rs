//! Batched writes from columnar sources into relational sinks.

mod builder;
pub use builder::Builder;

mod fan_out;
pub use fan_out::SourceOutcome;

use crate::RecordBridge;
use parqsql_core::{
    driver::{ColumnarSource, RelationalSink, SinkFactory},
    field::Record,
    schema::ColumnarSchema,
    Error, Result,
};
use std::sync::Arc;
use tokio::sync::watch;

/// Reads records from columnar sources and writes them to relational sinks in
/// fixed-size batches.
///
/// Every record is reconciled against the target schema: the sink always
/// receives one parameter per target column, with typed nulls for columns the
/// record lacks.
#[derive(Debug, Clone)]
pub struct BatchWriter {
    bridge: Arc<RecordBridge>,
    target: Arc<ColumnarSchema>,

    /// Target column names, in parameter order
    columns: Arc<[String]>,

    batch_size: usize,
    parallelism: usize,
    fail_fast: bool,
}

/// Counters for one written source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Rows added to the sink
    pub rows: u64,

    /// Batches executed
    pub batches: u64,
}

#[derive(Debug)]
enum State {
    Idle,
    Reading,
    Applying(Record),
    Committing,
    Draining,
    Done,
}

impl BatchWriter {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn target(&self) -> &ColumnarSchema {
        &self.target
    }

    /// Target column names, in the order the sink binds them.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Writes every record of `source` to `sink`.
    ///
    /// The sink is left open; releasing it is up to the caller. Batches
    /// executed before a failure stay written.
    pub async fn write(
        &self,
        source: &mut dyn ColumnarSource,
        sink: &mut dyn RelationalSink,
    ) -> Result<WriteStats> {
        self.write_until(source, sink, None).await
    }

    /// Like [`write`](Self::write), but stops before the next read once
    /// `cancel` turns `true`, failing with a cancellation error.
    async fn write_until(
        &self,
        source: &mut dyn ColumnarSource,
        sink: &mut dyn RelationalSink,
        mut cancel: Option<watch::Receiver<bool>>,
    ) -> Result<WriteStats> {
        let mut stats = WriteStats::default();
        let mut pending = 0;
        let mut state = State::Idle;

        loop {
            state = match state {
                State::Idle => State::Reading,
                State::Reading => {
                    let next = match cancel.as_mut() {
                        Some(cancel) => tokio::select! {
                            biased;
                            _ = cancelled(cancel) => None,
                            next = source.read_next() => Some(next),
                        },
                        None => Some(source.read_next().await),
                    };

                    let Some(next) = next else {
                        return Err(Error::cancelled(source.name()));
                    };

                    match next? {
                        Some(record) => State::Applying(record),
                        None => State::Draining,
                    }
                }
                State::Applying(record) => {
                    let row = self.bridge.reconcile(&record, source.schema(), &self.target)?;
                    row.apply(sink);
                    sink.add_batch()?;
                    pending += 1;
                    stats.rows += 1;

                    if pending >= self.batch_size {
                        State::Committing
                    } else {
                        State::Reading
                    }
                }
                State::Committing => {
                    self.commit(sink, &mut pending, &mut stats).await?;
                    State::Reading
                }
                State::Draining => {
                    if pending > 0 {
                        self.commit(sink, &mut pending, &mut stats).await?;
                    }
                    State::Done
                }
                State::Done => break,
            };
        }

        log::info!(
            "wrote {} rows from `{}` in {} batches",
            stats.rows,
            source.name(),
            stats.batches
        );
        Ok(stats)
    }

    async fn commit(
        &self,
        sink: &mut dyn RelationalSink,
        pending: &mut usize,
        stats: &mut WriteStats,
    ) -> Result<()> {
        let written = sink.execute_batch().await?;
        log::debug!(
            "executed batch of {pending} rows ({written} written) into `{}`",
            self.target.name
        );
        *pending = 0;
        stats.batches += 1;
        Ok(())
    }

    /// Acquires a sink from `factory`, writes `source` to it and closes it,
    /// whether or not the write succeeded.
    pub async fn write_scoped(
        &self,
        source: &mut dyn ColumnarSource,
        factory: &dyn SinkFactory,
    ) -> Result<WriteStats> {
        self.write_scoped_until(source, factory, None).await
    }

    async fn write_scoped_until(
        &self,
        source: &mut dyn ColumnarSource,
        factory: &dyn SinkFactory,
        cancel: Option<watch::Receiver<bool>>,
    ) -> Result<WriteStats> {
        let mut sink = factory.acquire(&self.columns).await?;
        let result = self.write_until(source, &mut *sink, cancel).await;
        let closed = sink.close().await;

        let stats = result?;
        closed?;
        Ok(stats)
    }
}

/// Resolves once `cancel` has turned `true`. Never resolves if the sending
/// side is gone without cancelling.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let sender_dropped = cancel.wait_for(|cancelled| *cancelled).await.is_err();
    if sender_dropped {
        std::future::pending::<()>().await;
    }
}
