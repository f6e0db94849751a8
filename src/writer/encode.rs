//! Typed encode operations
//!
//! Each operation writes the canonical minimal form of its value.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::time::SystemTime;

use chrono::{DateTime, TimeZone};

use super::Writer;
use crate::protocol::canonical::{self, Emit, Width};
use crate::protocol::error::len_u32;
use crate::protocol::{
    COMPLEX64_EXTENSION, COMPLEX128_EXTENSION, Complex64, Complex128, DynMap, Error, Extension,
    Marker, Result, TIME_EXTENSION, TIMESTAMP_PAYLOAD_LEN, Timestamp, ext_header,
};

impl Emit for Writer<'_> {
    type Error = Error;

    fn push(&mut self, byte: u8) -> Result<()> {
        self.push_byte(byte)
    }

    fn prefixed(&mut self, tag: u8, value: u64, width: Width) -> Result<()> {
        self.write_prefixed(tag, value, width)
    }
}

impl Writer<'_> {
    /// Write nil.
    pub fn write_nil(&mut self) -> Result<()> {
        canonical::nil(self)
    }

    /// Write a bool.
    pub fn write_bool(&mut self, b: bool) -> Result<()> {
        canonical::boolean(self, b)
    }

    /// Write an `i64` in its smallest form.
    pub fn write_int64(&mut self, i: i64) -> Result<()> {
        canonical::int(self, i)
    }

    /// Write an `i8`.
    pub fn write_int8(&mut self, i: i8) -> Result<()> {
        self.write_int64(i64::from(i))
    }

    /// Write an `i16`.
    pub fn write_int16(&mut self, i: i16) -> Result<()> {
        self.write_int64(i64::from(i))
    }

    /// Write an `i32`.
    pub fn write_int32(&mut self, i: i32) -> Result<()> {
        self.write_int64(i64::from(i))
    }

    /// Write an `isize`.
    pub fn write_isize(&mut self, i: isize) -> Result<()> {
        let i = i64::try_from(i)
            .map_err(|_| Error::Other(format!("isize {i} exceeds 64 bits")))?;
        self.write_int64(i)
    }

    /// Write a `u64` in its smallest form.
    pub fn write_uint64(&mut self, u: u64) -> Result<()> {
        canonical::uint(self, u)
    }

    /// Write a `u8`.
    pub fn write_uint8(&mut self, u: u8) -> Result<()> {
        self.write_uint64(u64::from(u))
    }

    /// Write a `u16`.
    pub fn write_uint16(&mut self, u: u16) -> Result<()> {
        self.write_uint64(u64::from(u))
    }

    /// Write a `u32`.
    pub fn write_uint32(&mut self, u: u32) -> Result<()> {
        self.write_uint64(u64::from(u))
    }

    /// Write a `usize`.
    pub fn write_usize(&mut self, u: usize) -> Result<()> {
        let u = u64::try_from(u)
            .map_err(|_| Error::Other(format!("usize {u} exceeds 64 bits")))?;
        self.write_uint64(u)
    }

    /// Write a float32.
    pub fn write_f32(&mut self, f: f32) -> Result<()> {
        canonical::float32(self, f)
    }

    /// Write a float64.
    pub fn write_f64(&mut self, f: f64) -> Result<()> {
        canonical::float64(self, f)
    }

    /// Write a map header for `n` entries.
    pub fn write_map_header(&mut self, n: u32) -> Result<()> {
        canonical::map_header(self, n)
    }

    /// Write an array header for `n` elements.
    pub fn write_array_header(&mut self, n: u32) -> Result<()> {
        canonical::array_header(self, n)
    }

    /// Write only a string header.
    ///
    /// The caller then writes exactly `n` bytes of UTF-8, e.g. through the
    /// writer's [`std::io::Write`] impl.
    pub fn write_string_header(&mut self, n: u32) -> Result<()> {
        canonical::str_header(self, n)
    }

    /// Write a string.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        self.write_string_header(len_u32(s.len())?)?;
        self.append_str(s)
    }

    /// Write raw bytes as a string. The bytes are not checked for UTF-8.
    pub fn write_string_from_bytes(&mut self, s: &[u8]) -> Result<()> {
        self.write_string_header(len_u32(s.len())?)?;
        self.append_bytes(s)
    }

    /// Write only a bin header; the caller then writes exactly `n` bytes.
    pub fn write_bytes_header(&mut self, n: u32) -> Result<()> {
        canonical::bin_header(self, n)
    }

    /// Write binary data.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.write_bytes_header(len_u32(data.len())?)?;
        self.append_bytes(data)
    }

    /// Write a complex64 as fixext8.
    pub fn write_complex64(&mut self, c: Complex64) -> Result<()> {
        let dst = self.reserve(10)?;
        dst[0] = Marker::FixExt8.as_u8();
        dst[1] = COMPLEX64_EXTENSION as u8;
        dst[2..6].copy_from_slice(&c.re.to_bits().to_be_bytes());
        dst[6..10].copy_from_slice(&c.im.to_bits().to_be_bytes());
        Ok(())
    }

    /// Write a complex128 as fixext16.
    pub fn write_complex128(&mut self, c: Complex128) -> Result<()> {
        let dst = self.reserve(18)?;
        dst[0] = Marker::FixExt16.as_u8();
        dst[1] = COMPLEX128_EXTENSION as u8;
        dst[2..10].copy_from_slice(&c.re.to_bits().to_be_bytes());
        dst[10..18].copy_from_slice(&c.im.to_bits().to_be_bytes());
        Ok(())
    }

    /// Write a timestamp as ext8 with a 12-byte payload.
    pub fn write_timestamp(&mut self, ts: Timestamp) -> Result<()> {
        let dst = self.reserve(3 + TIMESTAMP_PAYLOAD_LEN)?;
        dst[0] = Marker::Ext8.as_u8();
        dst[1] = TIMESTAMP_PAYLOAD_LEN as u8;
        dst[2] = TIME_EXTENSION as u8;
        dst[3..].copy_from_slice(&ts.to_bytes());
        Ok(())
    }

    /// Write a zoned date-time. The zone is dropped; only the instant is kept.
    pub fn write_time<Tz: TimeZone>(&mut self, time: &DateTime<Tz>) -> Result<()> {
        self.write_timestamp(Timestamp::from(time))
    }

    /// Write a system time.
    pub fn write_system_time(&mut self, time: SystemTime) -> Result<()> {
        self.write_timestamp(Timestamp::from(time))
    }

    /// Write a string-to-string map.
    pub fn write_map_str_str<S: BuildHasher>(
        &mut self,
        map: &HashMap<String, String, S>,
    ) -> Result<()> {
        self.write_map_header(len_u32(map.len())?)?;
        for (key, val) in map {
            self.write_string(key)?;
            self.write_string(val)?;
        }
        Ok(())
    }

    /// Write a string-keyed map of dynamically typed values.
    pub fn write_map_str_intf(&mut self, map: &DynMap) -> Result<()> {
        self.write_map_header(len_u32(map.len())?)?;
        for (key, val) in map {
            self.write_string(key)?;
            self.write_intf(&**val)?;
        }
        Ok(())
    }

    /// Write an extension value.
    ///
    /// Uses fixext for payloads of 1, 2, 4, 8 or 16 bytes, else the smallest
    /// ext8/16/32 form. Payloads that fit are marshaled straight into the
    /// buffer; larger ones go through a scratch vector to the sink.
    pub fn write_extension(&mut self, ext: &dyn Extension) -> Result<()> {
        let len = ext.len();
        let (marker, len_bytes, width) = ext_header(len_u32(len)?);
        let header = 2 + width;
        let fill_header = |dst: &mut [u8]| {
            dst[0] = marker.as_u8();
            dst[1..=width].copy_from_slice(&len_bytes[4 - width..]);
            dst[header - 1] = ext.ext_type() as u8;
        };

        if header + len <= self.capacity() {
            let dst = self.reserve(header + len)?;
            fill_header(dst);
            let result = ext.marshal_binary_to(&mut dst[header..]);
            if result.is_err() {
                // drop the half-written value
                self.truncate_tail(header + len);
            }
            return result;
        }

        let mut payload = vec![0u8; len];
        ext.marshal_binary_to(&mut payload)?;
        fill_header(self.reserve(header)?);
        self.append_bytes(&payload)
    }
}
