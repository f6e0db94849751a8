//! MessagePack wire format core
//!
//! This module provides the byte-level markers, inline prefix codec, wire
//! value types, capability traits, and size estimation for msgp.

pub mod append;
pub(crate) mod canonical;
pub(crate) mod error;
mod extension;
mod marker;
pub mod prefix;
mod reflect;
pub mod size;
mod types;

pub use append::{MarshalSizer, Marshaler, marshal_sized, require};
pub use canonical::Width;
pub use error::{Error, Result};
pub use extension::{Extension, ext_header};
pub use marker::Marker;
pub use prefix::Prefix;
pub use reflect::{DynMap, MapEntries, MapKey, Reflect, SeqItems, Shape};
pub use size::{Sizer, guess_size};
pub use types::{Complex64, Complex128, Timestamp};

/// Extension type id reserved for [`Complex64`] payloads
pub const COMPLEX64_EXTENSION: i8 = 3;

/// Extension type id reserved for [`Complex128`] payloads
pub const COMPLEX128_EXTENSION: i8 = 4;

/// Extension type id reserved for [`Timestamp`] payloads
pub const TIME_EXTENSION: i8 = 5;

/// Default writer buffer size in bytes
pub const DEFAULT_BUFFER_SIZE: usize = 2048;

/// Smallest usable writer buffer (a fixext16 complex128: marker + id + 16 bytes)
pub const MIN_BUFFER_SIZE: usize = 18;

/// Encoded timestamp payload: 8-byte seconds + 4-byte nanoseconds
pub const TIMESTAMP_PAYLOAD_LEN: usize = 12;
