use super::Error;

/// An error built from a formatted message, usually through [`err!`] or
/// [`bail!`].
///
/// [`err!`]: crate::err
/// [`bail!`]: crate::bail
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an error from format arguments.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        let message = match args.as_str() {
            Some(message) => message.into(),
            None => args.to_string().into(),
        };
        Error::from(super::ErrorKind::Adhoc(AdhocError { message }))
    }

    /// Returns `true` if this error was built from a formatted message.
    pub fn is_adhoc(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Adhoc(_))
    }
}
