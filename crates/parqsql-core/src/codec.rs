//! Encodings shared by the write and read paths.
//!
//! Every function here has an inverse in the same module; the converters
//! and the read path both go through them so the two directions cannot drift.

pub mod date;
pub mod decimal;
pub mod timestamp;
