use super::Error;

/// Error raised when one or more parameters of a row could not be set on a
/// relational sink.
///
/// Setters do not fail individually. The sink collects every failure for the
/// current row and reports them together when the row is committed to the
/// batch.
#[derive(Debug)]
pub(super) struct SinkApplyError {
    errors: Vec<String>,
}

impl std::error::Error for SinkApplyError {}

impl core::fmt::Display for SinkApplyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "errors when setting row parameters: [{}]",
            self.errors.join("; ")
        )
    }
}

impl Error {
    /// Creates an error carrying every parameter failure collected for a row.
    pub fn sink_apply(errors: Vec<String>) -> Error {
        Error::from(super::ErrorKind::SinkApply(SinkApplyError { errors }))
    }

    /// Returns `true` if this error reports failed row parameters.
    pub fn is_sink_apply(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::SinkApply(_))
    }

    /// The individual parameter failures, if this is a sink apply error.
    pub fn sink_apply_errors(&self) -> Option<&[String]> {
        match self.root_kind() {
            super::ErrorKind::SinkApply(err) => Some(&err.errors),
            _ => None,
        }
    }
}
