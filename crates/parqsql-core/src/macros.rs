/// Returns early with an ad hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// Implements `From<$ty> for Value` and `TryFrom<Value> for $ty` for a
/// variant that wraps the type directly.
macro_rules! impl_value_conversions {
    ( $( $ty:ty => $variant:ident ),+ $(,)? ) => {
        $(
            impl From<$ty> for $crate::value::Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl TryFrom<$crate::value::Value> for $ty {
                type Error = $crate::Error;

                fn try_from(value: $crate::value::Value) -> Result<Self, Self::Error> {
                    match value {
                        $crate::value::Value::$variant(value) => Ok(value),
                        value => Err($crate::Error::type_mismatch(&value, stringify!($ty))),
                    }
                }
            }
        )+
    };
}
