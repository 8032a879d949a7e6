use super::Error;

/// Error when a schema cannot be used.
///
/// This occurs when:
/// - A columnar type carries a logical annotation its physical type cannot
///   hold
/// - A columnar file uses nested groups
/// - The files of a dataset directory disagree on their schema
/// - A relational table has no columns
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::InvalidSchema(_))
    }
}
