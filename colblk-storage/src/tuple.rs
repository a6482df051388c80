use crate::builder::BlockBuilder;
use crate::cursor::BlockCursor;
use colblk_common::slice::Slice;
use colblk_datatype::{TupleInfo, Type, Value};
use rustc_hash::FxHasher;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

pub type TypeInfoRef = Arc<dyn FixedWidthTypeInfo>;

/// FixedWidthTypeInfo knows the byte width of a type and how to
/// read, compare, hash and append one encoded value at a given
/// offset of a buffer.
///
/// Offsets always point to the payload, never to the null marker.
/// Callers handle nulls before invoking any method here.
pub trait FixedWidthTypeInfo: fmt::Debug + Send + Sync {
    fn ty(&self) -> Type;

    /// Returns byte width of encoded payload.
    #[inline]
    fn width(&self) -> usize {
        self.ty().fixed_width()
    }

    #[inline]
    fn tuple_info(&self) -> TupleInfo {
        TupleInfo::single(self.ty())
    }

    fn get_boolean(&self, slice: &Slice, offset: usize) -> bool;

    fn get_long(&self, slice: &Slice, offset: usize) -> i64;

    fn get_double(&self, slice: &Slice, offset: usize) -> f64;

    /// Returns payload bytes, sharing the buffer.
    #[inline]
    fn get_slice(&self, slice: &Slice, offset: usize) -> Slice {
        slice.slice(offset, self.width())
    }

    fn get_object_value(&self, slice: &Slice, offset: usize) -> Value;

    fn equals(
        &self,
        left: &Slice,
        left_offset: usize,
        right: &Slice,
        right_offset: usize,
    ) -> bool;

    /// Compare encoded payload with current value of cursor.
    fn equals_cursor(&self, slice: &Slice, offset: usize, cursor: &dyn BlockCursor) -> bool;

    fn hash(&self, slice: &Slice, offset: usize) -> u64;

    fn compare(
        &self,
        left: &Slice,
        left_offset: usize,
        right: &Slice,
        right_offset: usize,
    ) -> Ordering;

    /// Append encoded payload to builder.
    #[inline]
    fn append_to(&self, slice: &Slice, offset: usize, builder: &mut dyn BlockBuilder) {
        builder.append_from(slice, offset)
    }
}

/// TypeInfo is the type descriptor of all built-in fixed-width types.
///
/// Booleans compare by decoded value, so any nonzero byte is true.
/// Doubles follow IEEE total order: `-0.0` sorts before `0.0`, and
/// NaN equals itself. Fixed bytes compare as unsigned bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    ty: Type,
}

impl TypeInfo {
    #[inline]
    pub fn new(ty: Type) -> Self {
        TypeInfo { ty }
    }

    /// Create a shared type descriptor.
    #[inline]
    pub fn new_ref(ty: Type) -> TypeInfoRef {
        Arc::new(TypeInfo::new(ty))
    }

    #[inline]
    fn check_type(&self, expected: Type, accessor: &str) {
        if self.ty != expected {
            type_mismatch(self.ty, accessor)
        }
    }
}

#[cold]
#[inline(never)]
fn type_mismatch(ty: Type, accessor: &str) -> ! {
    panic!("{} is not supported by {}", accessor, ty.to_lower())
}

#[inline]
fn read_bool(slice: &Slice, offset: usize) -> bool {
    slice.get_u8(offset) != 0
}

impl FixedWidthTypeInfo for TypeInfo {
    #[inline]
    fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    fn get_boolean(&self, slice: &Slice, offset: usize) -> bool {
        self.check_type(Type::Boolean, "boolean");
        read_bool(slice, offset)
    }

    #[inline]
    fn get_long(&self, slice: &Slice, offset: usize) -> i64 {
        self.check_type(Type::Long, "long");
        slice.get_i64(offset)
    }

    #[inline]
    fn get_double(&self, slice: &Slice, offset: usize) -> f64 {
        self.check_type(Type::Double, "double");
        slice.get_f64(offset)
    }

    fn get_object_value(&self, slice: &Slice, offset: usize) -> Value {
        match self.ty {
            Type::Boolean => Value::Boolean(read_bool(slice, offset)),
            Type::Long => Value::Long(slice.get_i64(offset)),
            Type::Double => Value::Double(slice.get_f64(offset)),
            Type::FixedBytes(n) => Value::bytes(slice.get_bytes(offset, n as usize)),
        }
    }

    fn equals(
        &self,
        left: &Slice,
        left_offset: usize,
        right: &Slice,
        right_offset: usize,
    ) -> bool {
        match self.ty {
            Type::Boolean => read_bool(left, left_offset) == read_bool(right, right_offset),
            Type::Long => left.get_i64(left_offset) == right.get_i64(right_offset),
            Type::Double => left
                .get_f64(left_offset)
                .total_cmp(&right.get_f64(right_offset))
                .is_eq(),
            Type::FixedBytes(n) => {
                let n = n as usize;
                left.get_bytes(left_offset, n) == right.get_bytes(right_offset, n)
            }
        }
    }

    fn equals_cursor(&self, slice: &Slice, offset: usize, cursor: &dyn BlockCursor) -> bool {
        match self.ty {
            Type::Boolean => read_bool(slice, offset) == cursor.get_boolean(),
            Type::Long => slice.get_i64(offset) == cursor.get_long(),
            Type::Double => slice.get_f64(offset).total_cmp(&cursor.get_double()).is_eq(),
            Type::FixedBytes(n) => {
                slice.get_bytes(offset, n as usize) == cursor.get_slice().as_bytes()
            }
        }
    }

    fn hash(&self, slice: &Slice, offset: usize) -> u64 {
        let mut hasher = FxHasher::default();
        match self.ty {
            Type::Boolean => hasher.write_u8(read_bool(slice, offset) as u8),
            Type::Long => hasher.write_i64(slice.get_i64(offset)),
            Type::Double => hasher.write_u64(slice.get_f64(offset).to_bits()),
            Type::FixedBytes(n) => hasher.write(slice.get_bytes(offset, n as usize)),
        }
        hasher.finish()
    }

    fn compare(
        &self,
        left: &Slice,
        left_offset: usize,
        right: &Slice,
        right_offset: usize,
    ) -> Ordering {
        match self.ty {
            Type::Boolean => read_bool(left, left_offset).cmp(&read_bool(right, right_offset)),
            Type::Long => left.get_i64(left_offset).cmp(&right.get_i64(right_offset)),
            Type::Double => left
                .get_f64(left_offset)
                .total_cmp(&right.get_f64(right_offset)),
            Type::FixedBytes(n) => {
                let n = n as usize;
                left.get_bytes(left_offset, n).cmp(right.get_bytes(right_offset, n))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_longs(vals: &[i64]) -> Slice {
        let mut bytes = Vec::new();
        for v in vals {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        Slice::from(bytes)
    }

    fn encode_doubles(vals: &[f64]) -> Slice {
        let mut bytes = Vec::new();
        for v in vals {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        Slice::from(bytes)
    }

    #[test]
    fn test_long_type_info() {
        let ti = TypeInfo::new(Type::Long);
        assert_eq!(8, ti.width());
        let s = encode_longs(&[42, -7, 42]);
        assert_eq!(42, ti.get_long(&s, 0));
        assert_eq!(Value::Long(-7), ti.get_object_value(&s, 8));
        assert!(ti.equals(&s, 0, &s, 16));
        assert!(!ti.equals(&s, 0, &s, 8));
        assert_eq!(Ordering::Greater, ti.compare(&s, 0, &s, 8));
        assert_eq!(Ordering::Less, ti.compare(&s, 8, &s, 16));
        assert_eq!(ti.hash(&s, 0), ti.hash(&s, 16));
        assert_eq!(8, ti.get_slice(&s, 8).len());
    }

    #[test]
    fn test_double_total_order() {
        let ti = TypeInfo::new(Type::Double);
        let s = encode_doubles(&[f64::NAN, f64::NAN, -0.0, 0.0, 1.5]);
        assert!(ti.equals(&s, 0, &s, 8));
        assert_eq!(ti.hash(&s, 0), ti.hash(&s, 8));
        assert!(!ti.equals(&s, 16, &s, 24));
        assert_eq!(Ordering::Less, ti.compare(&s, 16, &s, 24));
        assert_eq!(Ordering::Less, ti.compare(&s, 24, &s, 32));
        assert_eq!(1.5, ti.get_double(&s, 32));
    }

    #[test]
    fn test_boolean_any_nonzero_is_true() {
        let ti = TypeInfo::new(Type::Boolean);
        let s = Slice::copy_of(&[0, 1, 7]);
        assert!(!ti.get_boolean(&s, 0));
        assert!(ti.get_boolean(&s, 2));
        assert!(ti.equals(&s, 1, &s, 2));
        assert_eq!(ti.hash(&s, 1), ti.hash(&s, 2));
        assert_eq!(Ordering::Less, ti.compare(&s, 0, &s, 2));
        assert_eq!(Value::Boolean(true), ti.get_object_value(&s, 2));
    }

    #[test]
    fn test_fixed_bytes_unsigned_order() {
        let ti = TypeInfo::new(Type::FixedBytes(2));
        let s = Slice::copy_of(&[0x01, 0xff, 0x80, 0x00, 0x01, 0xff]);
        assert_eq!(Ordering::Less, ti.compare(&s, 0, &s, 2));
        assert!(ti.equals(&s, 0, &s, 4));
        assert_eq!(ti.hash(&s, 0), ti.hash(&s, 4));
        assert_eq!(Value::bytes(&[0x80, 0x00]), ti.get_object_value(&s, 2));
        assert_eq!(&[0x01, 0xff][..], ti.get_slice(&s, 4).as_bytes());
    }

    #[test]
    #[should_panic(expected = "long is not supported by boolean")]
    fn test_wrong_accessor_panics() {
        let ti = TypeInfo::new(Type::Boolean);
        let s = Slice::copy_of(&[0u8; 8]);
        ti.get_long(&s, 0);
    }
}
