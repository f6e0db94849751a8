//! Fixed-capacity buffered writer over a borrowed byte sink.

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, trace};

use super::WriterConfig;
use crate::protocol::{DEFAULT_BUFFER_SIZE, Error, MIN_BUFFER_SIZE, Result, Width};

/// Buffered MessagePack writer.
///
/// Bytes accumulate in one fixed allocation and reach the sink only when the
/// buffer runs out of room or [`Writer::flush`] is called. Call `flush` when
/// done; dropping the writer discards anything still buffered.
///
/// A sink that stops taking bytes never loses data: the unwritten tail moves
/// to the front of the buffer and goes out ahead of anything buffered later.
pub struct Writer<'a> {
    sink: &'a mut dyn Write,
    buf: Box<[u8]>,
    cursor: usize,
}

impl<'a> Writer<'a> {
    /// Create a writer with the default 2 KiB buffer.
    pub fn new(sink: &'a mut dyn Write) -> Self {
        Self::with_capacity(sink, DEFAULT_BUFFER_SIZE)
    }

    /// Create a writer with a custom buffer size.
    ///
    /// Sizes below [`MIN_BUFFER_SIZE`] are raised to it, since the largest
    /// fixed-size value (a complex128) must fit in one reservation.
    pub fn with_capacity(sink: &'a mut dyn Write, size: usize) -> Self {
        let size = size.max(MIN_BUFFER_SIZE);
        Self {
            sink,
            buf: vec![0u8; size].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Create a writer from a [`WriterConfig`].
    pub fn with_config(sink: &'a mut dyn Write, config: &WriterConfig) -> Self {
        Self::with_capacity(sink, config.buffer_size)
    }

    /// Total buffer capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes held but not yet flushed.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.cursor
    }

    /// Free bytes left in the buffer.
    #[must_use]
    pub fn available(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// The bytes held but not yet flushed.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Rebind to a new sink, discarding buffered bytes without flushing.
    pub fn reset(&mut self, sink: &'a mut dyn Write) {
        self.sink = sink;
        self.cursor = 0;
    }

    /// Reserve `n` contiguous bytes and return them for the caller to fill.
    ///
    /// Flushes first if fewer than `n` bytes are free. The reserved region
    /// counts as buffered immediately.
    pub fn reserve(&mut self, n: usize) -> Result<&mut [u8]> {
        if n > self.buf.len() {
            return Err(Error::BufferTooSmall {
                needed: n,
                capacity: self.buf.len(),
            });
        }
        if self.available() < n {
            self.flush()?;
        }
        let start = self.cursor;
        self.cursor += n;
        Ok(&mut self.buf[start..start + n])
    }

    /// Drop the last `n` buffered bytes.
    pub(crate) fn truncate_tail(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    /// Append raw bytes.
    ///
    /// Data that does not fit triggers a flush; data larger than the whole
    /// buffer then goes straight to the sink under the same partial-write
    /// policy as [`Writer::flush`]. If the sink fails part way through such
    /// a direct write, the bytes it did not take are not retained.
    pub fn append_bytes(&mut self, data: &[u8]) -> Result<()> {
        if self.available() < data.len() {
            self.flush()?;
            if data.len() > self.buf.len() {
                trace!(len = data.len(), "writing past buffer directly to sink");
                let (written, result) = drain(&mut *self.sink, data);
                if let Err(err) = result {
                    debug!(written, len = data.len(), "direct write failed");
                    return Err(Error::Io(err));
                }
                return Ok(());
            }
        }
        self.buf[self.cursor..self.cursor + data.len()].copy_from_slice(data);
        self.cursor += data.len();
        Ok(())
    }

    /// Append the UTF-8 bytes of `s`.
    pub fn append_str(&mut self, s: &str) -> Result<()> {
        self.append_bytes(s.as_bytes())
    }

    /// Append one byte.
    pub fn push_byte(&mut self, b: u8) -> Result<()> {
        if self.cursor == self.buf.len() {
            self.flush()?;
        }
        self.buf[self.cursor] = b;
        self.cursor += 1;
        Ok(())
    }

    /// Write `tag` followed by `value` as a big-endian integer of `width` bytes.
    pub fn write_prefixed(&mut self, tag: u8, value: u64, width: Width) -> Result<()> {
        let bytes = value.to_be_bytes();
        let dst = self.reserve(1 + width.bytes())?;
        dst[0] = tag;
        dst[1..].copy_from_slice(width.be_slice(&bytes));
        Ok(())
    }

    /// Write all buffered bytes to the sink.
    ///
    /// An empty buffer is a no-op. A partial write is normal progress: the
    /// next call continues from where the sink stopped. The attempt ends on
    /// a sink error, returned as [`Error::Io`], or on a write that accepts
    /// zero bytes, returned as [`Error::ShortWrite`]. Either way the
    /// unwritten tail moves to the front of the buffer, so nothing is lost
    /// or duplicated. Failed writes are never retried, `Interrupted`
    /// included.
    pub fn flush(&mut self) -> Result<()> {
        let pending = self.cursor;
        if pending == 0 {
            return Ok(());
        }
        let (written, result) = drain(&mut *self.sink, &self.buf[..pending]);
        self.buf.copy_within(written..pending, 0);
        self.cursor = pending - written;
        match result {
            Ok(()) => {
                trace!(bytes = pending, "flushed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::WriteZero => {
                debug!(
                    written,
                    remaining = self.cursor,
                    "sink stalled; retained unwritten tail"
                );
                Err(Error::ShortWrite {
                    written,
                    remaining: self.cursor,
                })
            }
            Err(err) => Err(Error::Io(err)),
        }
    }
}

/// Hand `data` to `sink` until it is all taken.
///
/// Returns how many bytes the sink accepted along with the outcome. A write
/// of zero bytes ends the attempt as `WriteZero`; any sink error ends it
/// as is.
fn drain(sink: &mut dyn Write, data: &[u8]) -> (usize, io::Result<()>) {
    let mut written = 0;
    while written < data.len() {
        match sink.write(&data[written..]) {
            Ok(0) => return (written, Err(io::ErrorKind::WriteZero.into())),
            Ok(n) => written += n.min(data.len() - written),
            Err(err) => return (written, Err(err)),
        }
    }
    (written, Ok(()))
}

impl Write for Writer<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.append_bytes(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Writer::flush(self)?;
        self.sink.flush()
    }
}

impl fmt::Debug for Writer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("capacity", &self.buf.len())
            .field("buffered", &self.cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Sink that accepts at most the scripted number of bytes per call,
    /// then everything once the script runs out.
    #[derive(Default)]
    struct ScriptedSink {
        limits: VecDeque<usize>,
        data: Vec<u8>,
        calls: usize,
    }

    impl ScriptedSink {
        fn with_limits(limits: &[usize]) -> Self {
            Self {
                limits: limits.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Write for ScriptedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            let n = self.limits.pop_front().unwrap_or(usize::MAX).min(buf.len());
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_flush_empty_is_noop() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::new(&mut sink);
        writer.flush().unwrap();

        assert_eq!(writer.buffered_len(), 0);
        assert_eq!(sink.calls, 0);
    }

    #[test]
    fn test_capacity_clamped_to_minimum() {
        let mut sink = ScriptedSink::default();
        let writer = Writer::with_capacity(&mut sink, 4);
        assert_eq!(writer.capacity(), MIN_BUFFER_SIZE);
    }

    #[test]
    fn test_config_default_size() {
        let mut sink = ScriptedSink::default();
        let writer = Writer::with_config(&mut sink, &WriterConfig::default());
        assert_eq!(writer.capacity(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_bytes_stay_buffered_until_flush() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::new(&mut sink);
        writer.append_bytes(b"abc").unwrap();
        writer.push_byte(b'd').unwrap();

        assert_eq!(writer.buffered(), b"abcd");
        writer.flush().unwrap();
        assert_eq!(writer.buffered_len(), 0);
        assert_eq!(sink.data, b"abcd");
        assert_eq!(sink.calls, 1);
    }

    #[test]
    fn test_push_flushes_when_full() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::with_capacity(&mut sink, MIN_BUFFER_SIZE);
        for b in 0..=MIN_BUFFER_SIZE as u8 {
            writer.push_byte(b).unwrap();
        }

        assert_eq!(writer.buffered(), [MIN_BUFFER_SIZE as u8]);
        assert_eq!(sink.data.len(), MIN_BUFFER_SIZE);
    }

    #[test]
    fn test_partial_writes_continue() {
        let mut sink = ScriptedSink::with_limits(&[4]);
        let mut writer = Writer::new(&mut sink);
        writer.append_bytes(b"0123456789").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.buffered_len(), 0);
        assert_eq!(sink.data, b"0123456789");
        assert_eq!(sink.calls, 2);
    }

    #[test]
    fn test_stalled_sink_retains_tail() {
        let mut sink = ScriptedSink::with_limits(&[4, 0]);
        let mut writer = Writer::new(&mut sink);
        writer.append_bytes(b"0123456789").unwrap();

        let err = writer.flush().unwrap_err();
        assert!(matches!(
            err,
            Error::ShortWrite {
                written: 4,
                remaining: 6
            }
        ));
        assert_eq!(writer.buffered(), b"456789");

        writer.append_bytes(b"ab").unwrap();
        writer.flush().unwrap();
        assert_eq!(sink.data, b"0123456789ab");
    }

    #[test]
    fn test_zero_length_write_is_short() {
        let mut sink = ScriptedSink::with_limits(&[0]);
        let mut writer = Writer::new(&mut sink);
        writer.append_bytes(b"xyz").unwrap();

        assert!(matches!(
            writer.flush(),
            Err(Error::ShortWrite {
                written: 0,
                remaining: 3
            })
        ));
        assert_eq!(writer.buffered(), b"xyz");
    }

    #[test]
    fn test_capped_sink_frees_room_for_reserve() {
        let mut sink = ScriptedSink::with_limits(&[1024; 8]);
        let mut writer = Writer::new(&mut sink);
        writer.append_bytes(&[0; DEFAULT_BUFFER_SIZE]).unwrap();
        writer.write_prefixed(0xcf, u64::MAX, Width::Eight).unwrap();

        assert_eq!(writer.buffered_len(), 9);
        assert_eq!(sink.data.len(), DEFAULT_BUFFER_SIZE);
        assert_eq!(sink.calls, 2);
    }

    #[test]
    fn test_interrupted_is_not_retried() {
        struct Interrupted(usize);

        impl Write for Interrupted {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                self.0 += 1;
                Err(io::ErrorKind::Interrupted.into())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = Interrupted(0);
        let mut writer = Writer::new(&mut sink);
        writer.append_bytes(b"once").unwrap();

        assert!(matches!(writer.flush(), Err(Error::Io(e)) if e.kind() == io::ErrorKind::Interrupted));
        assert_eq!(writer.buffered(), b"once");
        assert_eq!(sink.0, 1);
    }

    #[test]
    fn test_sink_error_keeps_buffer() {
        let mut sink = BrokenSink;
        let mut writer = Writer::new(&mut sink);
        writer.append_bytes(b"keep").unwrap();

        assert!(matches!(writer.flush(), Err(Error::Io(_))));
        assert_eq!(writer.buffered(), b"keep");
    }

    #[test]
    fn test_oversized_append_bypasses_buffer() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::with_capacity(&mut sink, 32);
        writer.append_bytes(b"head").unwrap();
        let big = vec![7u8; 100];
        writer.append_bytes(&big).unwrap();

        assert_eq!(writer.buffered_len(), 0);
        assert_eq!(sink.data.len(), 104);
        assert_eq!(&sink.data[..4], b"head");
        assert_eq!(sink.calls, 2);
    }

    #[test]
    fn test_oversized_append_survives_partial_writes() {
        let mut sink = ScriptedSink::with_limits(&[10, 25, 7]);
        let mut writer = Writer::with_capacity(&mut sink, 32);
        let big: Vec<u8> = (0..100).collect();
        writer.append_bytes(&big).unwrap();

        assert_eq!(writer.buffered_len(), 0);
        assert_eq!(sink.data, big);
        assert_eq!(sink.calls, 4);
    }

    #[test]
    fn test_oversized_append_reports_stall() {
        let mut sink = ScriptedSink::with_limits(&[40, 0]);
        let mut writer = Writer::with_capacity(&mut sink, 32);

        let err = writer.append_bytes(&[1; 100]).unwrap_err();
        assert!(matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::WriteZero));
        assert_eq!(sink.data.len(), 40);
    }

    #[test]
    fn test_append_flushes_when_out_of_room() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::with_capacity(&mut sink, 20);
        writer.append_str("0123456789abcdef").unwrap();
        writer.append_str("ghij").unwrap();
        writer.append_str("klmn").unwrap();

        assert_eq!(writer.buffered(), b"klmn");
        assert_eq!(sink.data, b"0123456789abcdefghij");
    }

    #[test]
    fn test_reserve_flushes_for_room() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::with_capacity(&mut sink, MIN_BUFFER_SIZE);
        writer.append_bytes(&[1; 10]).unwrap();

        let region = writer.reserve(MIN_BUFFER_SIZE).unwrap();
        region.fill(2);

        assert_eq!(writer.buffered(), [2; MIN_BUFFER_SIZE]);
        assert_eq!(sink.data, [1; 10]);
    }

    #[test]
    fn test_reserve_larger_than_buffer() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::with_capacity(&mut sink, MIN_BUFFER_SIZE);

        assert!(matches!(
            writer.reserve(MIN_BUFFER_SIZE + 1),
            Err(Error::BufferTooSmall {
                needed: 19,
                capacity: 18
            })
        ));
        assert_eq!(writer.buffered_len(), 0);
    }

    #[test]
    fn test_write_prefixed_widths() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::new(&mut sink);
        writer.write_prefixed(0xcc, 0xab, Width::One).unwrap();
        writer.write_prefixed(0xcd, 0x012c, Width::Two).unwrap();
        writer.write_prefixed(0xce, 0x0102_0304, Width::Four).unwrap();
        writer.write_prefixed(0xcf, 1, Width::Eight).unwrap();

        assert_eq!(
            writer.buffered(),
            [
                0xcc, 0xab, 0xcd, 0x01, 0x2c, 0xce, 1, 2, 3, 4, 0xcf, 0, 0, 0, 0, 0, 0, 0, 1
            ]
        );
    }

    #[test]
    fn test_reset_discards_buffer() {
        let mut first = ScriptedSink::default();
        let mut second = ScriptedSink::default();
        let mut writer = Writer::new(&mut first);
        writer.append_bytes(b"dropped").unwrap();
        writer.reset(&mut second);
        writer.append_bytes(b"kept").unwrap();
        writer.flush().unwrap();

        assert!(first.data.is_empty());
        assert_eq!(second.data, b"kept");
    }

    #[test]
    fn test_io_write_impl() {
        let mut sink = ScriptedSink::default();
        let mut writer = Writer::new(&mut sink);
        io::copy(&mut &b"streamed body"[..], &mut writer).unwrap();
        Write::flush(&mut writer).unwrap();

        assert_eq!(sink.data, b"streamed body");
    }
}
