//! Dynamic encoding of reflected values

use tracing::debug;

use super::Writer;
use crate::protocol::error::len_u32;
use crate::protocol::{Error, Reflect, Result, Shape};

impl Writer<'_> {
    /// Write a value whose type is known only at runtime.
    ///
    /// Rules are tried in order: the value's own [`Encode`](crate::Encode)
    /// implementation, then its [`Extension`](crate::Extension)
    /// implementation, then its [`Shape`]. Null references write nil;
    /// non-null ones write their target. Channels, functions and maps with
    /// non-string keys are rejected.
    ///
    /// An error mid-container leaves the bytes written so far in place.
    pub fn write_intf(&mut self, value: &dyn Reflect) -> Result<()> {
        if let Some(encoder) = value.as_encoder() {
            return encoder.encode_msg(self);
        }
        if let Some(ext) = value.as_extension() {
            return self.write_extension(ext);
        }

        match value.shape() {
            Shape::Nil | Shape::Ref(None) => self.write_nil(),
            Shape::Ref(Some(inner)) => self.write_intf(inner),
            Shape::Bool(b) => self.write_bool(b),
            Shape::Int(i) => self.write_int64(i),
            Shape::Uint(u) => self.write_uint64(u),
            Shape::F32(f) => self.write_f32(f),
            Shape::F64(f) => self.write_f64(f),
            Shape::Complex64(c) => self.write_complex64(c),
            Shape::Complex128(c) => self.write_complex128(c),
            Shape::Str(s) => self.write_string(s),
            Shape::Bytes(b) => self.write_bytes(&b),
            Shape::Time(ts) => self.write_timestamp(ts),
            Shape::Seq(items) => {
                self.write_array_header(len_u32(items.len())?)?;
                for item in items {
                    self.write_intf(item)?;
                }
                Ok(())
            }
            Shape::Map(entries) => {
                self.write_map_header(len_u32(entries.len())?)?;
                for (key, val) in entries {
                    self.write_string(key)?;
                    self.write_intf(val)?;
                }
                Ok(())
            }
            Shape::KeyedMap { key_type } => {
                debug!(key_type, "rejecting map with non-string keys");
                Err(Error::InvalidMapKey { key_type })
            }
            Shape::Unsupported(type_name) => {
                debug!(type_name, "rejecting unsupported type");
                Err(Error::UnsupportedType { type_name })
            }
        }
    }
}
