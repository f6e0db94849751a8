//! Inline prefix codec
//!
//! MessagePack packs small integers and short container/string headers into
//! the tag byte itself:
//!
//! ```text
//! 0xxxxxxx  positive fixint   0..=127
//! 111xxxxx  negative fixint   -32..=-1
//! 1000xxxx  fixmap            0..=15 entries
//! 1001xxxx  fixarray          0..=15 elements
//! 101xxxxx  fixstr            0..=31 bytes
//! ```

use super::Marker;

const FIXINT_MASK: u8 = 0x7f;
const NFIXINT: u8 = 0xe0;
const FIXMAP: u8 = 0x80;
const FIXARRAY: u8 = 0x90;
const FIXSTR: u8 = 0xa0;
const LAST4: u8 = 0x0f;
const LAST5: u8 = 0x1f;
const FIRST3: u8 = 0xe0;
const FIRST4: u8 = 0xf0;

/// Largest value a positive fixint carries
pub const MAX_FIXINT: u8 = 127;
/// Smallest value a negative fixint carries
pub const MIN_NEG_FIXINT: i8 = -32;
/// Largest fixmap / fixarray count
pub const MAX_FIX_CONTAINER: u8 = 15;
/// Largest fixstr byte length
pub const MAX_FIXSTR: u8 = 31;

/// Classification of a single tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// Positive fixint with its value
    PosFixint(u8),
    /// Negative fixint with its value
    NegFixint(i8),
    /// Fixmap with its entry count
    FixMap(u8),
    /// Fixarray with its element count
    FixArray(u8),
    /// Fixstr with its byte length
    FixStr(u8),
    /// One of the fixed markers
    Marker(Marker),
    /// The never-used byte 0xc1
    Reserved,
}

impl Prefix {
    /// Classify a tag byte
    #[must_use]
    pub fn classify(b: u8) -> Self {
        if is_fixint(b) {
            Self::PosFixint(b)
        } else if is_neg_fixint(b) {
            Self::NegFixint(b as i8)
        } else if is_fixmap(b) {
            Self::FixMap(b & LAST4)
        } else if is_fixarray(b) {
            Self::FixArray(b & LAST4)
        } else if is_fixstr(b) {
            Self::FixStr(b & LAST5)
        } else {
            Marker::from_u8(b).map_or(Self::Reserved, Self::Marker)
        }
    }
}

/// Top bit clear
#[must_use]
pub const fn is_fixint(b: u8) -> bool {
    b >> 7 == 0
}

/// Top three bits `111`
#[must_use]
pub const fn is_neg_fixint(b: u8) -> bool {
    b & FIRST3 == NFIXINT
}

/// Top four bits `1000`
#[must_use]
pub const fn is_fixmap(b: u8) -> bool {
    b & FIRST4 == FIXMAP
}

/// Top four bits `1001`
#[must_use]
pub const fn is_fixarray(b: u8) -> bool {
    b & FIRST4 == FIXARRAY
}

/// Top three bits `101`
#[must_use]
pub const fn is_fixstr(b: u8) -> bool {
    b & FIRST3 == FIXSTR
}

/// Positive fixint for `0..=127`; higher bits are masked off.
#[must_use]
pub const fn fixint(u: u8) -> u8 {
    u & FIXINT_MASK
}

/// Negative fixint for `-32..=-1`.
#[must_use]
pub const fn neg_fixint(i: i8) -> u8 {
    (i as u8) | NFIXINT
}

/// Fixmap header for `0..=15` entries.
#[must_use]
pub const fn fixmap(n: u8) -> u8 {
    FIXMAP | (n & LAST4)
}

/// Fixarray header for `0..=15` elements.
#[must_use]
pub const fn fixarray(n: u8) -> u8 {
    FIXARRAY | (n & LAST4)
}

/// Fixstr header for `0..=31` bytes.
#[must_use]
pub const fn fixstr(n: u8) -> u8 {
    FIXSTR | (n & LAST5)
}
