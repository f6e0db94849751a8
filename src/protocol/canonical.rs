//! Canonical minimal encoding
//!
//! Every scalar and header picks the smallest wire form that exactly
//! represents it. The selection lives here once and is shared by the
//! buffered [`Writer`](crate::Writer) and the `append_*` family.

use super::{Marker, prefix};

/// Width of the big-endian field written after a tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// 1 byte
    One = 1,
    /// 2 bytes
    Two = 2,
    /// 4 bytes
    Four = 4,
    /// 8 bytes
    Eight = 8,
}

impl Width {
    /// Number of bytes
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Low `width` bytes of `value`, big-endian.
    #[must_use]
    pub fn be_slice(self, value: &[u8; 8]) -> &[u8] {
        &value[8 - self.bytes()..]
    }
}

/// Byte destination the canonical encoders write through.
pub(crate) trait Emit {
    type Error;

    /// One raw byte
    fn push(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Tag byte followed by `value` as a big-endian integer of `width` bytes
    fn prefixed(&mut self, tag: u8, value: u64, width: Width) -> Result<(), Self::Error>;
}

pub(crate) fn nil<E: Emit>(out: &mut E) -> Result<(), E::Error> {
    out.push(Marker::Nil.as_u8())
}

pub(crate) fn boolean<E: Emit>(out: &mut E, b: bool) -> Result<(), E::Error> {
    out.push(if b { Marker::True } else { Marker::False }.as_u8())
}

pub(crate) fn uint<E: Emit>(out: &mut E, u: u64) -> Result<(), E::Error> {
    if u <= u64::from(prefix::MAX_FIXINT) {
        out.push(prefix::fixint(u as u8))
    } else if u <= u64::from(u8::MAX) {
        out.prefixed(Marker::Uint8.as_u8(), u, Width::One)
    } else if u <= u64::from(u16::MAX) {
        out.prefixed(Marker::Uint16.as_u8(), u, Width::Two)
    } else if u <= u64::from(u32::MAX) {
        out.prefixed(Marker::Uint32.as_u8(), u, Width::Four)
    } else {
        out.prefixed(Marker::Uint64.as_u8(), u, Width::Eight)
    }
}

pub(crate) fn int<E: Emit>(out: &mut E, i: i64) -> Result<(), E::Error> {
    // two's complement; `prefixed` keeps only the low `width` bytes
    let bits = i as u64;
    if i >= 0 {
        if i <= i64::from(prefix::MAX_FIXINT) {
            out.push(prefix::fixint(i as u8))
        } else if i <= i64::from(i16::MAX) {
            out.prefixed(Marker::Int16.as_u8(), bits, Width::Two)
        } else if i <= i64::from(i32::MAX) {
            out.prefixed(Marker::Int32.as_u8(), bits, Width::Four)
        } else {
            out.prefixed(Marker::Int64.as_u8(), bits, Width::Eight)
        }
    } else if i >= i64::from(prefix::MIN_NEG_FIXINT) {
        out.push(prefix::neg_fixint(i as i8))
    } else if i >= i64::from(i8::MIN) {
        out.prefixed(Marker::Int8.as_u8(), bits, Width::One)
    } else if i >= i64::from(i16::MIN) {
        out.prefixed(Marker::Int16.as_u8(), bits, Width::Two)
    } else if i >= i64::from(i32::MIN) {
        out.prefixed(Marker::Int32.as_u8(), bits, Width::Four)
    } else {
        out.prefixed(Marker::Int64.as_u8(), bits, Width::Eight)
    }
}

pub(crate) fn float32<E: Emit>(out: &mut E, f: f32) -> Result<(), E::Error> {
    out.prefixed(Marker::Float32.as_u8(), u64::from(f.to_bits()), Width::Four)
}

pub(crate) fn float64<E: Emit>(out: &mut E, f: f64) -> Result<(), E::Error> {
    out.prefixed(Marker::Float64.as_u8(), f.to_bits(), Width::Eight)
}

pub(crate) fn map_header<E: Emit>(out: &mut E, n: u32) -> Result<(), E::Error> {
    if n <= u32::from(prefix::MAX_FIX_CONTAINER) {
        out.push(prefix::fixmap(n as u8))
    } else if n <= u32::from(u16::MAX) {
        out.prefixed(Marker::Map16.as_u8(), u64::from(n), Width::Two)
    } else {
        out.prefixed(Marker::Map32.as_u8(), u64::from(n), Width::Four)
    }
}

pub(crate) fn array_header<E: Emit>(out: &mut E, n: u32) -> Result<(), E::Error> {
    if n <= u32::from(prefix::MAX_FIX_CONTAINER) {
        out.push(prefix::fixarray(n as u8))
    } else if n <= u32::from(u16::MAX) {
        out.prefixed(Marker::Array16.as_u8(), u64::from(n), Width::Two)
    } else {
        out.prefixed(Marker::Array32.as_u8(), u64::from(n), Width::Four)
    }
}

pub(crate) fn str_header<E: Emit>(out: &mut E, n: u32) -> Result<(), E::Error> {
    if n <= u32::from(prefix::MAX_FIXSTR) {
        out.push(prefix::fixstr(n as u8))
    } else if n <= u32::from(u8::MAX) {
        out.prefixed(Marker::Str8.as_u8(), u64::from(n), Width::One)
    } else if n <= u32::from(u16::MAX) {
        out.prefixed(Marker::Str16.as_u8(), u64::from(n), Width::Two)
    } else {
        out.prefixed(Marker::Str32.as_u8(), u64::from(n), Width::Four)
    }
}

pub(crate) fn bin_header<E: Emit>(out: &mut E, n: u32) -> Result<(), E::Error> {
    if n <= u32::from(u8::MAX) {
        out.prefixed(Marker::Bin8.as_u8(), u64::from(n), Width::One)
    } else if n <= u32::from(u16::MAX) {
        out.prefixed(Marker::Bin16.as_u8(), u64::from(n), Width::Two)
    } else {
        out.prefixed(Marker::Bin32.as_u8(), u64::from(n), Width::Four)
    }
}
