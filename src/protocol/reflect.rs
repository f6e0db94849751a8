//! Runtime shape introspection for the dynamic encoder
//!
//! [`Reflect`] is what [`Writer::write_intf`](crate::Writer::write_intf)
//! consumes. A value first gets a chance to expose one of the capability
//! traits ([`Encode`], [`Extension`], [`Sizer`]); otherwise it describes
//! itself as a [`Shape`], a closed set of wire-mappable forms.

use std::any::type_name;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::time::SystemTime;

use bytes::{Bytes, BytesMut};
use chrono::{DateTime, TimeZone};

use super::{Complex64, Complex128, Extension, Sizer, Timestamp};
use crate::writer::Encode;

/// Elements of a sequence, in order
pub type SeqItems<'a> = Box<dyn ExactSizeIterator<Item = &'a dyn Reflect> + 'a>;

/// Entries of a string-keyed mapping
pub type MapEntries<'a> = Box<dyn ExactSizeIterator<Item = (&'a str, &'a dyn Reflect)> + 'a>;

/// String-keyed map of dynamically typed values
pub type DynMap = HashMap<String, Box<dyn Reflect>>;

/// Wire-mappable form of a value
pub enum Shape<'a> {
    /// nil
    Nil,
    /// bool
    Bool(bool),
    /// Any signed integer width
    Int(i64),
    /// Any unsigned integer width
    Uint(u64),
    /// float32
    F32(f32),
    /// float64
    F64(f64),
    /// Complex number with `f32` parts
    Complex64(Complex64),
    /// Complex number with `f64` parts
    Complex128(Complex128),
    /// UTF-8 string
    Str(&'a str),
    /// Byte sequence, copied only when the source is not contiguous
    Bytes(Cow<'a, [u8]>),
    /// Instant in time
    Time(Timestamp),
    /// Nullable reference
    Ref(Option<&'a dyn Reflect>),
    /// Sequence of values
    Seq(SeqItems<'a>),
    /// Mapping with string keys
    Map(MapEntries<'a>),
    /// Mapping whose keys are not strings
    KeyedMap {
        /// Name of the key type
        key_type: &'static str,
    },
    /// Value kind with no wire mapping
    Unsupported(&'static str),
}

impl Shape<'_> {
    /// Shape for a type that is only encodable through a capability.
    #[must_use]
    pub fn opaque<T: ?Sized>() -> Self {
        Shape::Unsupported(type_name::<T>())
    }
}

/// Runtime introspection used by the dynamic encoder.
///
/// Capability accessors are consulted before [`Reflect::shape`], in the order
/// encoder, extension. A type implementing both is always encoded through
/// its [`Encode`] implementation.
pub trait Reflect {
    /// Custom encoder capability
    fn as_encoder(&self) -> Option<&dyn Encode> {
        None
    }

    /// Extension capability
    fn as_extension(&self) -> Option<&dyn Extension> {
        None
    }

    /// Size hint capability
    fn as_sizer(&self) -> Option<&dyn Sizer> {
        None
    }

    /// Describe the value
    fn shape(&self) -> Shape<'_>;

    /// Reinterpret a slice of `Self` as raw bytes. Only `u8` answers.
    #[doc(hidden)]
    fn byte_slice(items: &[Self]) -> Option<&[u8]>
    where
        Self: Sized,
    {
        let _ = items;
        None
    }
}

/// Key types usable in reflected mappings.
///
/// Only string-like keys are encodable; the others exist so that such maps
/// are rejected with [`Error::InvalidMapKey`](crate::Error::InvalidMapKey)
/// instead of failing to compile.
pub trait MapKey {
    /// Whether keys of this type are strings
    const STRING: bool;

    /// The key as a string
    fn key_str(&self) -> Option<&str>;
}

macro_rules! string_keys {
    ($($ty:ty),*) => {$(
        impl MapKey for $ty {
            const STRING: bool = true;

            fn key_str(&self) -> Option<&str> {
                Some(&**self)
            }
        }
    )*};
}

string_keys!(String, &str, Box<str>, Rc<str>, Arc<str>, Cow<'_, str>);

macro_rules! other_keys {
    ($($ty:ty),*) => {$(
        impl MapKey for $ty {
            const STRING: bool = false;

            fn key_str(&self) -> Option<&str> {
                None
            }
        }
    )*};
}

other_keys!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! reflect_int {
    ($variant:ident, $wide:ty, $($ty:ty),*) => {$(
        impl Reflect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::$variant(*self as $wide)
            }
        }
    )*};
}

reflect_int!(Int, i64, i8, i16, i32, i64, isize);
reflect_int!(Uint, u64, u16, u32, u64, usize);

impl Reflect for u8 {
    fn shape(&self) -> Shape<'_> {
        Shape::Uint(u64::from(*self))
    }

    fn byte_slice(items: &[u8]) -> Option<&[u8]> {
        Some(items)
    }
}

impl Reflect for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Nil
    }
}

impl Reflect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

impl Reflect for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::F32(*self)
    }
}

impl Reflect for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::F64(*self)
    }
}

impl Reflect for Complex64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Complex64(*self)
    }
}

impl Reflect for Complex128 {
    fn shape(&self) -> Shape<'_> {
        Shape::Complex128(*self)
    }
}

impl Reflect for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Reflect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Reflect for Bytes {
    fn shape(&self) -> Shape<'_> {
        Shape::Bytes(Cow::Borrowed(&self[..]))
    }
}

impl Reflect for BytesMut {
    fn shape(&self) -> Shape<'_> {
        Shape::Bytes(Cow::Borrowed(&self[..]))
    }
}

impl Reflect for Timestamp {
    fn shape(&self) -> Shape<'_> {
        Shape::Time(*self)
    }
}

impl Reflect for SystemTime {
    fn shape(&self) -> Shape<'_> {
        Shape::Time(Timestamp::from(*self))
    }
}

impl<Tz: TimeZone> Reflect for DateTime<Tz> {
    fn shape(&self) -> Shape<'_> {
        Shape::Time(Timestamp::from(self))
    }
}

// Non-null pointers are transparent: they expose whatever the pointee does.
macro_rules! reflect_pointer {
    ($($ptr:ty),*) => {$(
        impl<T: Reflect + ?Sized> Reflect for $ptr {
            fn as_encoder(&self) -> Option<&dyn Encode> {
                (**self).as_encoder()
            }

            fn as_extension(&self) -> Option<&dyn Extension> {
                (**self).as_extension()
            }

            fn as_sizer(&self) -> Option<&dyn Sizer> {
                (**self).as_sizer()
            }

            fn shape(&self) -> Shape<'_> {
                (**self).shape()
            }
        }
    )*};
}

reflect_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: Reflect> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Ref(self.as_ref().map(|inner| inner as &dyn Reflect))
    }
}

fn seq<T: Reflect>(items: &[T]) -> Shape<'_> {
    match T::byte_slice(items) {
        Some(bytes) => Shape::Bytes(Cow::Borrowed(bytes)),
        None => Shape::Seq(Box::new(items.iter().map(|item| item as &dyn Reflect))),
    }
}

impl<T: Reflect> Reflect for [T] {
    fn shape(&self) -> Shape<'_> {
        seq(self)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        seq(self)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        seq(self)
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        let (front, back) = self.as_slices();
        match (T::byte_slice(front), T::byte_slice(back)) {
            (Some(front), Some([])) => Shape::Bytes(Cow::Borrowed(front)),
            (Some(front), Some(back)) => Shape::Bytes(Cow::Owned([front, back].concat())),
            _ => Shape::Seq(Box::new(self.iter().map(|item| item as &dyn Reflect))),
        }
    }
}

fn keyed<'a, K, V, I>(entries: I) -> Shape<'a>
where
    K: MapKey + 'a,
    V: Reflect + 'a,
    I: ExactSizeIterator<Item = (&'a K, &'a V)> + 'a,
{
    if !K::STRING {
        return Shape::KeyedMap {
            key_type: type_name::<K>(),
        };
    }
    Shape::Map(Box::new(entries.map(|(key, val)| {
        (key.key_str().unwrap_or_default(), val as &dyn Reflect)
    })))
}

impl<K: MapKey, V: Reflect, S: BuildHasher> Reflect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        keyed(self.iter())
    }
}

impl<K: MapKey, V: Reflect> Reflect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        keyed(self.iter())
    }
}

// Functions and channel ends can never be serialized.
macro_rules! unsupported {
    ($([$($gen:ident),*] $ty:ty),*) => {$(
        impl<$($gen),*> Reflect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::opaque::<Self>()
            }
        }
    )*};
}

unsupported!(
    [T] Sender<T>,
    [T] SyncSender<T>,
    [T] Receiver<T>,
    [R] fn() -> R,
    [A, R] fn(A) -> R,
    [A, B, R] fn(A, B) -> R
);
