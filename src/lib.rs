//! msgp - MessagePack runtime encoder
//!
//! This library provides the encoding half of a MessagePack runtime: a
//! buffered writer over any `std::io::Write` sink, typed operations that
//! always pick the canonical minimal wire form, and a dynamic encoder for
//! values whose type is only known at runtime.
//!
//! # Quick Start
//!
//! ```rust
//! use msgp::Writer;
//!
//! let mut out = Vec::new();
//! let mut writer = Writer::new(&mut out);
//! writer.write_map_header(1)?;
//! writer.write_string("port")?;
//! writer.write_uint16(9000)?;
//! writer.flush()?;
//!
//! assert_eq!(out, [0x81, 0xa4, b'p', b'o', b'r', b't', 0xcd, 0x23, 0x28]);
//! # Ok::<(), msgp::Error>(())
//! ```
//!
//! Dynamically typed values go through [`Reflect`]:
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! let mut tags = BTreeMap::new();
//! tags.insert("ids", vec![1_u32, 2]);
//!
//! let bytes = msgp::to_bytes(&tags)?;
//! assert_eq!(bytes.as_ref(), [0x81, 0xa3, b'i', b'd', b's', 0x92, 0x01, 0x02]);
//! # Ok::<(), msgp::Error>(())
//! ```
//!
//! # Features
//!
//! - **Canonical minimal encoding** - every integer, header and length uses the smallest form
//! - **Short-write safe buffering** - a partial flush never loses or duplicates bytes
//! - **Capability dispatch** - [`Encode`], then [`Extension`], then the value's [`Shape`]
//! - **Built-in extensions** - timestamps and complex numbers with reserved type ids
//! - **Append family** - the same encoding straight into a `Vec<u8>`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;
pub mod writer;

pub use protocol::{
    COMPLEX64_EXTENSION, COMPLEX128_EXTENSION, Complex64, Complex128, DEFAULT_BUFFER_SIZE, DynMap,
    Error, Extension, MIN_BUFFER_SIZE, MapKey, MarshalSizer, Marshaler, Marker, Prefix, Reflect,
    Result, Shape, Sizer, TIME_EXTENSION, Timestamp, guess_size, marshal_sized,
};
pub use writer::{Encode, Writer, WriterConfig, encode, encode_intf, to_bytes};
