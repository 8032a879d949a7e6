//! Dates are stored as signed days since 1970-01-01.

use crate::Result;
use jiff::{civil::Date, Span};

const EPOCH: Date = Date::constant(1970, 1, 1);

pub fn encode_days(date: Date) -> Result<i32> {
    Ok(EPOCH.until(date)?.get_days())
}

pub fn decode_days(days: i32) -> Result<Date> {
    Ok(EPOCH.checked_add(Span::new().try_days(i64::from(days))?)?)
}
