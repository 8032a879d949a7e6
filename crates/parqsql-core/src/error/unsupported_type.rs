use super::Error;

/// Error when no registered converter accepts a column's value class.
#[derive(Debug)]
pub(super) struct UnsupportedType {
    column: Box<str>,
    class: Box<str>,
}

impl std::error::Error for UnsupportedType {}

impl core::fmt::Display for UnsupportedType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported type: no converter accepts class `{}` (column `{}`)",
            self.class, self.column
        )
    }
}

impl Error {
    /// Creates an unsupported type error.
    pub fn unsupported_type(column: impl Into<String>, class: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedType(UnsupportedType {
            column: column.into().into(),
            class: class.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported type error.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnsupportedType(_))
    }
}
