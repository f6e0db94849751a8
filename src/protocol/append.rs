//! Append-style encoding into a growable byte vector
//!
//! The `append_*` functions produce exactly the bytes the buffered
//! [`Writer`](crate::Writer) would, but extend a caller-owned `Vec<u8>`.
//! [`Marshaler`] implementations build on them.

use std::convert::Infallible;

use super::canonical::{self, Emit, Width};
use super::error::len_u32;
use super::{Result, Sizer};

/// Types that append their MessagePack form to a byte vector.
pub trait Marshaler {
    /// Append the encoded form of `self` to `buf`.
    fn marshal_msg(&self, buf: &mut Vec<u8>) -> Result<()>;
}

/// A [`Marshaler`] that can also estimate its encoded size.
pub trait MarshalSizer: Marshaler + Sizer {}

impl<T: Marshaler + Sizer + ?Sized> MarshalSizer for T {}

/// Marshal into a fresh vector pre-sized from the size hint.
pub fn marshal_sized(value: &dyn MarshalSizer) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    require(&mut buf, value.msg_size());
    value.marshal_msg(&mut buf)?;
    Ok(buf)
}

/// Ensure `buf` has room for `extra` more bytes.
///
/// Capacity grows to the greater of double the current capacity and the
/// required length; existing content is preserved.
pub fn require(buf: &mut Vec<u8>, extra: usize) {
    let len = buf.len();
    let needed = len.saturating_add(extra);
    if buf.capacity() >= needed {
        return;
    }
    let target = if len == 0 {
        extra
    } else {
        buf.capacity().saturating_mul(2).max(needed)
    };
    buf.reserve_exact(target - len);
}

impl Emit for Vec<u8> {
    type Error = Infallible;

    fn push(&mut self, byte: u8) -> std::result::Result<(), Infallible> {
        require(self, 1);
        Vec::push(self, byte);
        Ok(())
    }

    fn prefixed(
        &mut self,
        tag: u8,
        value: u64,
        width: Width,
    ) -> std::result::Result<(), Infallible> {
        require(self, 1 + width.bytes());
        Vec::push(self, tag);
        self.extend_from_slice(width.be_slice(&value.to_be_bytes()));
        Ok(())
    }
}

fn done(result: std::result::Result<(), Infallible>) {
    let Ok(()) = result;
}

/// Append nil
pub fn append_nil(buf: &mut Vec<u8>) {
    done(canonical::nil(buf));
}

/// Append a bool
pub fn append_bool(buf: &mut Vec<u8>, b: bool) {
    done(canonical::boolean(buf, b));
}

/// Append a signed integer in its smallest form
pub fn append_int(buf: &mut Vec<u8>, i: i64) {
    done(canonical::int(buf, i));
}

/// Append an unsigned integer in its smallest form
pub fn append_uint(buf: &mut Vec<u8>, u: u64) {
    done(canonical::uint(buf, u));
}

/// Append a float32
pub fn append_f32(buf: &mut Vec<u8>, f: f32) {
    done(canonical::float32(buf, f));
}

/// Append a float64
pub fn append_f64(buf: &mut Vec<u8>, f: f64) {
    done(canonical::float64(buf, f));
}

/// Append a map header
pub fn append_map_header(buf: &mut Vec<u8>, n: u32) {
    done(canonical::map_header(buf, n));
}

/// Append an array header
pub fn append_array_header(buf: &mut Vec<u8>, n: u32) {
    done(canonical::array_header(buf, n));
}

/// Append a string header; the caller appends `n` UTF-8 bytes
pub fn append_string_header(buf: &mut Vec<u8>, n: u32) {
    done(canonical::str_header(buf, n));
}

/// Append a bin header; the caller appends `n` bytes
pub fn append_bytes_header(buf: &mut Vec<u8>, n: u32) {
    done(canonical::bin_header(buf, n));
}

/// Append a string
pub fn append_str(buf: &mut Vec<u8>, s: &str) -> Result<()> {
    append_string_header(buf, len_u32(s.len())?);
    require(buf, s.len());
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Append binary data
pub fn append_bytes(buf: &mut Vec<u8>, data: &[u8]) -> Result<()> {
    append_bytes_header(buf, len_u32(data.len())?);
    require(buf, data.len());
    buf.extend_from_slice(data);
    Ok(())
}
