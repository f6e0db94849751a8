//! Extension capability and extension header selection

use super::{Marker, Result};

/// A value carried as a MessagePack extension: an application type id plus
/// an opaque payload.
///
/// Ids 3, 4 and 5 are reserved for the built-in complex and timestamp
/// encodings (see [`crate::protocol::TIME_EXTENSION`] and friends).
pub trait Extension {
    /// Application-defined type id
    fn ext_type(&self) -> i8;

    /// Exact payload length in bytes
    fn len(&self) -> usize;

    /// Whether the payload is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the payload into `buf`, which is exactly [`Extension::len`] bytes.
    fn marshal_binary_to(&self, buf: &mut [u8]) -> Result<()>;
}

/// Header bytes for an extension of `len` payload bytes.
///
/// Returns the marker, the big-endian length field (empty for fixext forms)
/// and its width. Payload lengths of exactly 1, 2, 4, 8 or 16 use the fixext
/// markers; everything else picks the smallest of ext8/ext16/ext32.
#[must_use]
pub fn ext_header(len: u32) -> (Marker, [u8; 4], usize) {
    let bytes = len.to_be_bytes();
    match len {
        1 => (Marker::FixExt1, bytes, 0),
        2 => (Marker::FixExt2, bytes, 0),
        4 => (Marker::FixExt4, bytes, 0),
        8 => (Marker::FixExt8, bytes, 0),
        16 => (Marker::FixExt16, bytes, 0),
        _ if len <= u32::from(u8::MAX) => (Marker::Ext8, bytes, 1),
        _ if len <= u32::from(u16::MAX) => (Marker::Ext16, bytes, 2),
        _ => (Marker::Ext32, bytes, 4),
    }
}
