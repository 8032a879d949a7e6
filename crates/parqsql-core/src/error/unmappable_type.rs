use super::Error;

/// Error when a columnar field has a type with no relational counterpart,
/// such as a time-of-day column.
#[derive(Debug)]
pub(super) struct UnmappableType {
    field: Box<str>,
    ty: Box<str>,
}

impl std::error::Error for UnmappableType {}

impl core::fmt::Display for UnmappableType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "field `{}` of type {} cannot be applied to a relational sink",
            self.field, self.ty
        )
    }
}

impl Error {
    /// Creates an unmappable type error.
    pub fn unmappable_type(field: impl Into<String>, ty: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnmappableType(UnmappableType {
            field: field.into().into(),
            ty: ty.into().into(),
        }))
    }

    /// Returns `true` if this error is an unmappable type error.
    pub fn is_unmappable_type(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnmappableType(_))
    }
}
