//! Decimals are stored as their unscaled value at the column's scale.
//!
//! The physical width comes from [`DecimalWidth::for_precision`], the same
//! rule that derives the column type.

use crate::{
    schema::{
        decimal::{effective_precision, effective_scale},
        DecimalWidth,
    },
    Error, Result, Value,
};
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Encodes `value` for a column declared with `precision` and `scale`.
///
/// The value is first truncated toward zero to the column's effective scale.
/// An unscaled value too wide for the column's physical width is an error.
pub fn encode(field: &str, value: &BigDecimal, precision: i32, scale: i32) -> Result<Value> {
    let scale = effective_scale(scale);
    let width = DecimalWidth::for_precision(effective_precision(precision));

    let rescaled = value.with_scale_round(i64::from(scale), RoundingMode::Down);
    if rescaled != *value {
        log::debug!("field `{field}`: {value} truncated to {rescaled}");
    }

    let (unscaled, _) = rescaled.into_bigint_and_exponent();

    match width {
        DecimalWidth::Int32 => unscaled.to_i32().map(Value::I32).ok_or_else(|| {
            Error::convert(field, format!("unscaled value {unscaled} does not fit in INT32"))
        }),
        DecimalWidth::Int64 => unscaled.to_i64().map(Value::I64).ok_or_else(|| {
            Error::convert(field, format!("unscaled value {unscaled} does not fit in INT64"))
        }),
        DecimalWidth::Binary => Ok(Value::Bytes(unscaled.to_signed_bytes_be())),
    }
}

/// Decodes a stored unscaled value with the stored `scale`.
pub fn decode(field: &str, stored: &Value, scale: u32) -> Result<BigDecimal> {
    let unscaled = match stored {
        Value::I32(v) => BigInt::from(*v),
        Value::I64(v) => BigInt::from(*v),
        Value::Bytes(v) => BigInt::from_signed_bytes_be(v),
        value => {
            return Err(Error::convert(
                field,
                format!("a decimal cannot be stored as {}", value.kind_name()),
            ))
        }
    };
    Ok(BigDecimal::new(unscaled, i64::from(scale)))
}
