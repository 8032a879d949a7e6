use super::Error;

/// Error recorded for a source whose worker was aborted after another source
/// failed.
#[derive(Debug)]
pub(super) struct Cancelled {
    source: Box<str>,
}

impl std::error::Error for Cancelled {}

impl core::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cancelled: `{}` was not written", self.source)
    }
}

impl Error {
    /// Creates a cancellation error for the named source.
    pub fn cancelled(source: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Cancelled(Cancelled {
            source: source.into().into(),
        }))
    }

    /// Returns `true` if this error is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Cancelled(_))
    }
}
