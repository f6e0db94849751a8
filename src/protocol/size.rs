//! Encoded size constants and the advisory size estimator

use super::{Reflect, Shape};

/// Types that can estimate their encoded size.
///
/// Optional; encoders and marshalers use it to pre-size buffers.
pub trait Sizer {
    /// Estimated encoded size in bytes
    fn msg_size(&self) -> usize;
}

/// nil
pub const NIL_SIZE: usize = 1;
/// bool
pub const BOOL_SIZE: usize = 1;
/// Largest signed integer form
pub const INT_SIZE: usize = 9;
/// Largest unsigned integer form
pub const UINT_SIZE: usize = 9;
/// float32
pub const FLOAT32_SIZE: usize = 5;
/// float64
pub const FLOAT64_SIZE: usize = 9;
/// fixext8 complex64
pub const COMPLEX64_SIZE: usize = 10;
/// fixext16 complex128
pub const COMPLEX128_SIZE: usize = 18;
/// ext8 timestamp
pub const TIME_SIZE: usize = 15;
/// Largest string header
pub const STRING_PREFIX_SIZE: usize = 5;
/// Largest bin header
pub const BYTES_PREFIX_SIZE: usize = 5;
/// Largest map header
pub const MAP_HEADER_SIZE: usize = 5;
/// Largest array header
pub const ARRAY_HEADER_SIZE: usize = 5;
/// Largest extension header (ext32 marker, length, type id)
pub const EXTENSION_PREFIX_SIZE: usize = 6;
/// Guess for anything the estimator does not recognize
pub const DEFAULT_GUESS: usize = 512;

/// Guess the encoded size of `value` without encoding it.
///
/// Exact upper bounds for built-in scalars and [`Sizer`] values, a recursive
/// sum for string-keyed maps, and [`DEFAULT_GUESS`] for everything else.
/// The result is a pre-allocation hint, not a bound.
#[must_use]
pub fn guess_size(value: &dyn Reflect) -> usize {
    if let Some(sizer) = value.as_sizer() {
        return sizer.msg_size();
    }
    if let Some(ext) = value.as_extension() {
        return EXTENSION_PREFIX_SIZE + ext.len();
    }
    match value.shape() {
        Shape::Nil => NIL_SIZE,
        Shape::Bool(_) => BOOL_SIZE,
        Shape::Int(_) => INT_SIZE,
        Shape::Uint(_) => UINT_SIZE,
        Shape::F32(_) => FLOAT32_SIZE,
        Shape::F64(_) => FLOAT64_SIZE,
        Shape::Complex64(_) => COMPLEX64_SIZE,
        Shape::Complex128(_) => COMPLEX128_SIZE,
        Shape::Str(s) => STRING_PREFIX_SIZE + s.len(),
        Shape::Bytes(b) => BYTES_PREFIX_SIZE + b.len(),
        Shape::Time(_) => TIME_SIZE,
        Shape::Map(entries) => entries.fold(MAP_HEADER_SIZE, |size, (key, val)| {
            size + STRING_PREFIX_SIZE + key.len() + guess_size(val)
        }),
        Shape::Ref(_) | Shape::Seq(_) | Shape::KeyedMap { .. } | Shape::Unsupported(_) => {
            DEFAULT_GUESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Complex64, Extension, Result};
    use std::collections::BTreeMap;

    #[test]
    fn test_scalars() {
        assert_eq!(guess_size(&()), NIL_SIZE);
        assert_eq!(guess_size(&true), BOOL_SIZE);
        assert_eq!(guess_size(&7_u16), UINT_SIZE);
        assert_eq!(guess_size(&-7_i8), INT_SIZE);
        assert_eq!(guess_size(&1.0_f32), FLOAT32_SIZE);
        assert_eq!(guess_size(&1.0_f64), FLOAT64_SIZE);
        assert_eq!(guess_size(&Complex64::new(1.0, 2.0)), COMPLEX64_SIZE);
        assert_eq!(guess_size(&"hello"), STRING_PREFIX_SIZE + 5);
        assert_eq!(guess_size(&vec![0_u8; 10]), BYTES_PREFIX_SIZE + 10);
    }

    #[test]
    fn test_string_keyed_map_sums_entries() {
        let mut map = BTreeMap::new();
        map.insert("ab".to_string(), "xyz".to_string());
        map.insert("c".to_string(), String::new());

        let expected = MAP_HEADER_SIZE
            + (STRING_PREFIX_SIZE + 2 + STRING_PREFIX_SIZE + 3)
            + (STRING_PREFIX_SIZE + 1 + STRING_PREFIX_SIZE);
        assert_eq!(guess_size(&map), expected);
    }

    #[test]
    fn test_unknown_falls_back_to_default() {
        assert_eq!(guess_size(&vec![1_i32, 2, 3]), DEFAULT_GUESS);
        assert_eq!(guess_size(&Some(5_u8)), DEFAULT_GUESS);
    }

    struct Hinted;

    impl Sizer for Hinted {
        fn msg_size(&self) -> usize {
            42
        }
    }

    impl Reflect for Hinted {
        fn as_sizer(&self) -> Option<&dyn Sizer> {
            Some(self)
        }

        fn shape(&self) -> Shape<'_> {
            Shape::opaque::<Self>()
        }
    }

    struct Blob([u8; 3]);

    impl Extension for Blob {
        fn ext_type(&self) -> i8 {
            42
        }

        fn len(&self) -> usize {
            self.0.len()
        }

        fn marshal_binary_to(&self, buf: &mut [u8]) -> Result<()> {
            buf.copy_from_slice(&self.0);
            Ok(())
        }
    }

    impl Reflect for Blob {
        fn as_extension(&self) -> Option<&dyn Extension> {
            Some(self)
        }

        fn shape(&self) -> Shape<'_> {
            Shape::opaque::<Self>()
        }
    }

    #[test]
    fn test_capabilities_take_precedence() {
        assert_eq!(guess_size(&Hinted), 42);
        assert_eq!(guess_size(&Blob([1, 2, 3])), EXTENSION_PREFIX_SIZE + 3);
    }
}
