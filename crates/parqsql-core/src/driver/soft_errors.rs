use crate::{Error, Result};

/// Per-row parameter failures held by a sink until the row is added to the
/// batch.
#[derive(Debug, Default)]
pub struct SoftErrors {
    errors: Vec<String>,
}

impl SoftErrors {
    pub fn new() -> SoftErrors {
        SoftErrors::default()
    }

    /// Records a failure for parameter `index`.
    pub fn push(&mut self, index: usize, message: impl core::fmt::Display) {
        self.errors.push(format!("parameter {index}: {message}"));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Clears the collected failures, returning them as one error.
    pub fn take(&mut self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::sink_apply(std::mem::take(&mut self.errors)))
        }
    }
}
