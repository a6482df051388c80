pub mod sort;
pub mod value;

pub use sort::SortOrder;
pub use value::Value;

use colblk_common::error::{Error, Result};
use std::borrow::Cow;

/// Logical type of a fixed-width column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    /// Single byte, any nonzero byte is true.
    Boolean,
    /// Signed 64-bit integer.
    Long,
    /// 64-bit IEEE floating point.
    Double,
    /// Byte sequence of fixed length.
    FixedBytes(u16),
}

impl Type {
    /// Fixed-length byte sequence, zero length is not allowed.
    #[inline]
    pub fn fixed_bytes(len: u16) -> Result<Self> {
        if len == 0 {
            return Err(Error::InvalidArgument(
                "fixed bytes length must be positive".to_string(),
            ));
        }
        Ok(Type::FixedBytes(len))
    }

    /// Returns byte width of encoded value.
    #[inline]
    pub fn fixed_width(&self) -> usize {
        match self {
            Type::Boolean => 1,
            Type::Long | Type::Double => 8,
            Type::FixedBytes(n) => *n as usize,
        }
    }

    #[inline]
    pub fn to_lower(&self) -> Cow<'_, str> {
        match self {
            Type::Boolean => Cow::Borrowed("boolean"),
            Type::Long => Cow::Borrowed("long"),
            Type::Double => Cow::Borrowed("double"),
            Type::FixedBytes(n) => Cow::Owned(format!("fixed_bytes({})", n)),
        }
    }
}

/// Describes the columns of a tuple.
/// Blocks in this crate always hold a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TupleInfo {
    ty: Type,
}

impl TupleInfo {
    #[inline]
    pub fn single(ty: Type) -> Self {
        TupleInfo { ty }
    }

    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    /// Returns byte width of the tuple payload.
    #[inline]
    pub fn fixed_width(&self) -> usize {
        self.ty.fixed_width()
    }
}

impl From<Type> for TupleInfo {
    #[inline]
    fn from(ty: Type) -> Self {
        TupleInfo::single(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_width() {
        assert_eq!(1, Type::Boolean.fixed_width());
        assert_eq!(8, Type::Long.fixed_width());
        assert_eq!(8, Type::Double.fixed_width());
        assert_eq!(12, Type::fixed_bytes(12).unwrap().fixed_width());
        assert!(Type::fixed_bytes(0).is_err());
        assert_eq!("fixed_bytes(3)", Type::FixedBytes(3).to_lower());
    }

    #[test]
    fn test_tuple_info() {
        let ti = TupleInfo::from(Type::Long);
        assert_eq!(Type::Long, ti.ty());
        assert_eq!(8, ti.fixed_width());
        assert_eq!(TupleInfo::single(Type::Long), ti);
    }
}
