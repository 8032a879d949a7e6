use crate::Result;

/// Julian day number of 1970-01-01.
pub const JULIAN_DAY_OF_EPOCH: i64 = 2_440_588;

const NANOS_PER_DAY: i128 = 86_400 * 1_000_000_000;

/// A legacy 96-bit timestamp: 64 bits of nanoseconds within the day followed
/// by a 32-bit Julian day number, as three little-endian words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Int96 {
    data: [u32; 3],
}

impl Int96 {
    pub fn from_data(data: [u32; 3]) -> Int96 {
        Int96 { data }
    }

    pub fn new(julian_day: u32, nanos_of_day: u64) -> Int96 {
        Int96 {
            data: [nanos_of_day as u32, (nanos_of_day >> 32) as u32, julian_day],
        }
    }

    pub fn data(&self) -> [u32; 3] {
        self.data
    }

    pub fn julian_day(&self) -> u32 {
        self.data[2]
    }

    pub fn nanos_of_day(&self) -> u64 {
        (u64::from(self.data[1]) << 32) | u64::from(self.data[0])
    }

    /// The instant this value encodes.
    pub fn to_timestamp(&self) -> Result<jiff::Timestamp> {
        let days = i64::from(self.julian_day()) - JULIAN_DAY_OF_EPOCH;
        let nanos = i128::from(days) * NANOS_PER_DAY + i128::from(self.nanos_of_day());
        Ok(jiff::Timestamp::from_nanosecond(nanos)?)
    }

    pub fn from_timestamp(ts: jiff::Timestamp) -> Int96 {
        let nanos = ts.as_nanosecond();
        let days = nanos.div_euclid(NANOS_PER_DAY);
        let nanos_of_day = nanos.rem_euclid(NANOS_PER_DAY);
        Int96::new(
            (days + i128::from(JULIAN_DAY_OF_EPOCH)) as u32,
            nanos_of_day as u64,
        )
    }
}
