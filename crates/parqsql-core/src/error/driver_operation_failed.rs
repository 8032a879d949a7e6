use super::Error;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// A call into rusqlite, the parquet crate or the filesystem failed.
#[derive(Debug)]
pub(super) struct DriverOperationFailed {
    pub(super) inner: BoxError,
}

impl StdError for DriverOperationFailed {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DriverOperationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut shown = self.inner.to_string();
        f.write_str(&shown)?;

        // storage libraries often repeat their cause in their own message
        let mut source = self.inner.source();
        while let Some(err) = source {
            let message = err.to_string();
            if !shown.contains(&message) {
                write!(f, ": {message}")?;
                shown = message;
            }
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Wraps a failure reported by a storage library.
    pub fn driver_operation_failed(err: impl StdError + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::DriverOperationFailed(
            DriverOperationFailed {
                inner: Box::new(err),
            },
        ))
    }

    pub fn is_driver_operation_failed(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::DriverOperationFailed(_))
    }

    /// The storage library's own error, if the root cause is a driver
    /// failure of type `E`.
    ///
    /// ```
    /// use parqsql_core::Error;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "part-0.parquet");
    /// let err = Error::from(io).context("opening dataset");
    ///
    /// let io = err.driver_error::<std::io::Error>().unwrap();
    /// assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    /// ```
    pub fn driver_error<E: StdError + 'static>(&self) -> Option<&E> {
        match self.root_kind() {
            super::ErrorKind::DriverOperationFailed(err) => err.inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl core::fmt::Display for Outer {
        fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
            write!(f, "write failed: {}", self.0)
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn repeated_causes_are_shown_once() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = Error::driver_operation_failed(Outer(io));
        assert_eq!(err.to_string(), "write failed: disk full");
    }

    #[test]
    fn driver_error_downcasts_through_context() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io).context("writing `users`");

        assert!(err.is_driver_operation_failed());
        assert_eq!(
            err.driver_error::<std::io::Error>().map(|io| io.kind()),
            Some(std::io::ErrorKind::PermissionDenied)
        );
        assert!(err.driver_error::<core::fmt::Error>().is_none());
        assert!(Error::cancelled("a").driver_error::<std::io::Error>().is_none());
    }
}
