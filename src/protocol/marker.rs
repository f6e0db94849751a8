//! Fixed single-byte MessagePack markers

use std::fmt;

/// MessagePack markers that carry no inline payload bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Marker {
    /// nil
    Nil = 0xc0,
    /// false
    False = 0xc2,
    /// true
    True = 0xc3,

    /// bin 8
    Bin8 = 0xc4,
    /// bin 16
    Bin16 = 0xc5,
    /// bin 32
    Bin32 = 0xc6,

    /// ext 8
    Ext8 = 0xc7,
    /// ext 16
    Ext16 = 0xc8,
    /// ext 32
    Ext32 = 0xc9,

    /// float 32
    Float32 = 0xca,
    /// float 64
    Float64 = 0xcb,

    /// uint 8
    Uint8 = 0xcc,
    /// uint 16
    Uint16 = 0xcd,
    /// uint 32
    Uint32 = 0xce,
    /// uint 64
    Uint64 = 0xcf,

    /// int 8
    Int8 = 0xd0,
    /// int 16
    Int16 = 0xd1,
    /// int 32
    Int32 = 0xd2,
    /// int 64
    Int64 = 0xd3,

    /// fixext 1
    FixExt1 = 0xd4,
    /// fixext 2
    FixExt2 = 0xd5,
    /// fixext 4
    FixExt4 = 0xd6,
    /// fixext 8
    FixExt8 = 0xd7,
    /// fixext 16
    FixExt16 = 0xd8,

    /// str 8
    Str8 = 0xd9,
    /// str 16
    Str16 = 0xda,
    /// str 32
    Str32 = 0xdb,

    /// array 16
    Array16 = 0xdc,
    /// array 32
    Array32 = 0xdd,

    /// map 16
    Map16 = 0xde,
    /// map 32
    Map32 = 0xdf,
}

impl Marker {
    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        let marker = match value {
            0xc0 => Self::Nil,
            0xc2 => Self::False,
            0xc3 => Self::True,
            0xc4 => Self::Bin8,
            0xc5 => Self::Bin16,
            0xc6 => Self::Bin32,
            0xc7 => Self::Ext8,
            0xc8 => Self::Ext16,
            0xc9 => Self::Ext32,
            0xca => Self::Float32,
            0xcb => Self::Float64,
            0xcc => Self::Uint8,
            0xcd => Self::Uint16,
            0xce => Self::Uint32,
            0xcf => Self::Uint64,
            0xd0 => Self::Int8,
            0xd1 => Self::Int16,
            0xd2 => Self::Int32,
            0xd3 => Self::Int64,
            0xd4 => Self::FixExt1,
            0xd5 => Self::FixExt2,
            0xd6 => Self::FixExt4,
            0xd7 => Self::FixExt8,
            0xd8 => Self::FixExt16,
            0xd9 => Self::Str8,
            0xda => Self::Str16,
            0xdb => Self::Str32,
            0xdc => Self::Array16,
            0xdd => Self::Array32,
            0xde => Self::Map16,
            0xdf => Self::Map32,
            _ => return None,
        };
        Some(marker)
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Length of the big-endian field that follows the marker byte.
    ///
    /// For sized markers (str, bin, array, map, ext) this is the length field;
    /// for scalars it is the payload itself.
    #[must_use]
    pub const fn follow_len(self) -> usize {
        match self {
            Self::Nil | Self::False | Self::True => 0,
            Self::Bin8 | Self::Ext8 | Self::Uint8 | Self::Int8 | Self::Str8 => 1,
            Self::Bin16
            | Self::Ext16
            | Self::Uint16
            | Self::Int16
            | Self::Str16
            | Self::Array16
            | Self::Map16 => 2,
            Self::Bin32
            | Self::Ext32
            | Self::Float32
            | Self::Uint32
            | Self::Int32
            | Self::Str32
            | Self::Array32
            | Self::Map32 => 4,
            Self::Float64 | Self::Uint64 | Self::Int64 => 8,
            // type id byte only; the payload length is implied by the marker
            Self::FixExt1 | Self::FixExt2 | Self::FixExt4 | Self::FixExt8 | Self::FixExt16 => 1,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::False => "false",
            Self::True => "true",
            Self::Bin8 => "bin8",
            Self::Bin16 => "bin16",
            Self::Bin32 => "bin32",
            Self::Ext8 => "ext8",
            Self::Ext16 => "ext16",
            Self::Ext32 => "ext32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::FixExt1 => "fixext1",
            Self::FixExt2 => "fixext2",
            Self::FixExt4 => "fixext4",
            Self::FixExt8 => "fixext8",
            Self::FixExt16 => "fixext16",
            Self::Str8 => "str8",
            Self::Str16 => "str16",
            Self::Str32 => "str32",
            Self::Array16 => "array16",
            Self::Array32 => "array32",
            Self::Map16 => "map16",
            Self::Map32 => "map32",
        };
        write!(f, "{name}")
    }
}
