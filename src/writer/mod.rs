//! Buffered MessagePack writer
//!
//! [`Writer`] batches encoded bytes in a fixed buffer over any
//! [`std::io::Write`] sink. Typed `write_*` operations cover the static path;
//! [`Writer::write_intf`] handles values known only through [`Reflect`].

mod buffer;
mod dynamic;
mod encode;

use std::io::Write;

use bytes::{BufMut, Bytes, BytesMut};

pub use buffer::Writer;

use crate::protocol::{DEFAULT_BUFFER_SIZE, Reflect, Result, guess_size};

/// Writer configuration options.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Size of the writer buffer in bytes.
    pub buffer_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Types that know how to write themselves through a [`Writer`].
///
/// Normally implemented by generated code; takes priority over every other
/// dynamic encoding rule.
pub trait Encode {
    /// Write the MessagePack form of `self`.
    fn encode_msg(&self, writer: &mut Writer<'_>) -> Result<()>;
}

/// Encode `value` to `sink` and flush.
pub fn encode(sink: &mut dyn Write, value: &dyn Encode) -> Result<()> {
    let mut writer = Writer::new(sink);
    value.encode_msg(&mut writer)?;
    writer.flush()
}

/// Encode a dynamically typed `value` to `sink` and flush.
pub fn encode_intf(sink: &mut dyn Write, value: &dyn Reflect) -> Result<()> {
    let mut writer = Writer::new(sink);
    writer.write_intf(value)?;
    writer.flush()
}

/// Encode a dynamically typed `value` into a new [`Bytes`].
///
/// The output is pre-sized with [`guess_size`].
pub fn to_bytes(value: &dyn Reflect) -> Result<Bytes> {
    let mut out = BytesMut::with_capacity(guess_size(value)).writer();
    let mut writer = Writer::new(&mut out);
    writer.write_intf(value)?;
    writer.flush()?;
    Ok(out.into_inner().freeze())
}
