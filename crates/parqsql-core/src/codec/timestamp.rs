//! Timestamps are stored as the session's wall clock read as if it were UTC.
//!
//! Encoding adds the session offset in effect at the instant itself.
//! Decoding takes the stored wall clock and resolves it back to an instant in
//! the session time zone. A wall clock repeated by a backward transition
//! resolves to its earlier occurrence.

use crate::{schema::TimeUnit, Result};
use jiff::{tz::TimeZone, Timestamp};

/// Encodes an instant as wall-clock epoch milliseconds in `tz`.
pub fn encode_millis(ts: Timestamp, tz: &TimeZone) -> i64 {
    let offset = tz.to_offset(ts);
    ts.as_millisecond() + i64::from(offset.seconds()) * 1000
}

/// Decodes wall-clock epoch milliseconds written by [`encode_millis`].
pub fn decode_millis(stored: i64, tz: &TimeZone) -> Result<Timestamp> {
    decode(stored, TimeUnit::Millis, tz)
}

/// Decodes a stored wall-clock value of the given unit.
pub fn decode(stored: i64, unit: TimeUnit, tz: &TimeZone) -> Result<Timestamp> {
    let wall = match unit {
        TimeUnit::Millis => Timestamp::from_millisecond(stored)?,
        TimeUnit::Micros => Timestamp::from_microsecond(stored)?,
        TimeUnit::Nanos => Timestamp::from_nanosecond(i128::from(stored))?,
    };
    resolve_wall_clock(wall, tz)
}

/// Reads `wall` as a civil datetime and finds the instant it names in `tz`.
pub fn resolve_wall_clock(wall: Timestamp, tz: &TimeZone) -> Result<Timestamp> {
    let datetime = TimeZone::UTC.to_datetime(wall);
    Ok(tz.to_ambiguous_timestamp(datetime).compatible()?)
}
