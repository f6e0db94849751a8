//! Wire value types without a direct Rust primitive

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Complex number with `f32` parts (fixext8 on the wire)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex64 {
    /// Real part
    pub re: f32,
    /// Imaginary part
    pub im: f32,
}

impl Complex64 {
    /// Create a complex number
    #[must_use]
    pub const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

/// Complex number with `f64` parts (fixext16 on the wire)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex128 {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex128 {
    /// Create a complex number
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// Absolute instant as encoded on the wire.
///
/// Zone and offset information never survives: every source is normalized
/// to seconds since the Unix epoch plus a non-negative nanosecond offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

impl Timestamp {
    /// Create from Unix seconds and a nanosecond offset.
    ///
    /// Nanoseconds outside `0..1_000_000_000` are carried into the seconds.
    #[must_use]
    pub fn new(seconds: i64, nanos: i64) -> Self {
        let nanos_per_sec = i64::from(NANOS_PER_SEC);
        let seconds = seconds.saturating_add(nanos.div_euclid(nanos_per_sec));
        let nanos = nanos.rem_euclid(nanos_per_sec) as i32;
        Self { seconds, nanos }
    }

    /// Seconds since the Unix epoch
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanosecond offset within the second
    #[must_use]
    pub const fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Wire payload: big-endian seconds followed by big-endian nanoseconds
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 12] {
        let mut bytes = [0u8; 12];
        bytes[0..8].copy_from_slice(&self.seconds.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.nanos.to_be_bytes());
        bytes
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self {
                seconds: i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                nanos: after.subsec_nanos() as i32,
            },
            Err(err) => {
                let before = err.duration();
                let seconds = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                Self::new(-seconds, -i64::from(before.subsec_nanos()))
            }
        }
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Timestamp {
    fn from(time: &DateTime<Tz>) -> Self {
        // leap seconds report up to 1_999_999_999 nanos
        Self::new(time.timestamp(), i64::from(time.timestamp_subsec_nanos()))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(time: DateTime<Tz>) -> Self {
        Self::from(&time)
    }
}
