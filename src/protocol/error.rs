//! msgp error types

use thiserror::Error;

/// msgp encoding errors
#[derive(Error, Debug)]
pub enum Error {
    /// The sink stopped accepting bytes during a flush; the tail is still buffered
    #[error("short write: sink stalled after {written} bytes, {remaining} still buffered")]
    ShortWrite {
        /// Bytes accepted by the sink
        written: usize,
        /// Bytes retained at the front of the buffer
        remaining: usize,
    },

    /// Value kind has no MessagePack mapping
    #[error("msgp: type {type_name} not supported")]
    UnsupportedType {
        /// Name of the offending type
        type_name: &'static str,
    },

    /// Dynamically encoded map has non-string keys
    #[error("msgp: map keys must be strings, got {key_type}")]
    InvalidMapKey {
        /// Name of the key type
        key_type: &'static str,
    },

    /// Reservation larger than the whole writer buffer
    #[error("buffer too small: need {needed} contiguous bytes, capacity is {capacity}")]
    BufferTooSmall {
        /// Requested contiguous bytes
        needed: usize,
        /// Total buffer capacity
        capacity: usize,
    },

    /// Length does not fit a 32-bit MessagePack header
    #[error("length {len} exceeds the 32-bit MessagePack limit")]
    LengthOverflow {
        /// Offending length
        len: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Narrow a collection length to the 32-bit header range.
pub(crate) fn len_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::LengthOverflow { len })
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => err,
            short @ Error::ShortWrite { .. } => {
                std::io::Error::new(std::io::ErrorKind::WriteZero, short)
            }
            other => std::io::Error::other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let stalled = Error::ShortWrite {
            written: 1,
            remaining: 2,
        };
        assert_eq!(
            std::io::Error::from(stalled).kind(),
            std::io::ErrorKind::WriteZero
        );

        let broken = Error::Io(std::io::ErrorKind::BrokenPipe.into());
        assert_eq!(
            std::io::Error::from(broken).kind(),
            std::io::ErrorKind::BrokenPipe
        );
    }
}
