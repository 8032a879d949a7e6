use super::Error;
use crate::Value;

/// Error when a single value cannot be converted between representations.
///
/// This occurs when:
/// - A decimal's unscaled value does not fit in the physical width chosen for
///   its column
/// - A value's shape does not match the physical type it is decoded as
/// - Bytes stored as a string column are not valid UTF-8
#[derive(Debug)]
pub(super) struct ConvertError {
    field: Option<Box<str>>,
    message: Box<str>,
}

impl std::error::Error for ConvertError {}

impl core::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "cannot convert field `{field}`: {}", self.message),
            None => write!(f, "cannot convert value: {}", self.message),
        }
    }
}

impl Error {
    /// Creates a conversion error for the named field.
    pub fn convert(field: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Convert(ConvertError {
            field: Some(field.into().into()),
            message: message.into().into(),
        }))
    }

    /// Creates a conversion error for a value that is not of the expected
    /// type.
    pub fn type_mismatch(value: &Value, expected: &str) -> Error {
        Error::from(super::ErrorKind::Convert(ConvertError {
            field: None,
            message: format!("expected {expected}, found {value:?}").into(),
        }))
    }

    /// Returns `true` if this error is a conversion error.
    pub fn is_convert(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Convert(_))
    }
}
