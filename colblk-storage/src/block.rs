use crate::builder::BlockBuilder;
use crate::cursor::BlockCursor;
use crate::encoding::BlockEncoding;
use colblk_common::error::Result;
use colblk_common::slice::Slice;
use colblk_datatype::{SortOrder, TupleInfo, Value};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub type BlockRef = Arc<dyn RandomAccessBlock>;

/// RandomAccessBlock is the capability of reading any position
/// of a block in constant time.
///
/// Accessors taking a position panic if the position is not within
/// `[0, position_count)`. An invalid position is always a caller bug.
///
/// # Raw comparison contract
///
/// Every implementation must be able to compare one of its values
/// against an encoded payload at an arbitrary offset of an external
/// buffer, see [`equals_raw`](RandomAccessBlock::equals_raw) and
/// [`compare_to_raw`](RandomAccessBlock::compare_to_raw).
/// Comparisons between two blocks, or a block and a cursor, are built
/// on this primitive: the left side hands its own encoded bytes to the
/// right side, and reverses the returned ordering since the right side
/// evaluated it from its own point of view. The null policy is applied
/// before delegation by [`equals_nullable`] and [`compare_nullable`].
pub trait RandomAccessBlock: fmt::Debug + Send + Sync {
    /// Returns tuple info of values in this block.
    fn tuple_info(&self) -> TupleInfo;

    /// Returns number of positions.
    fn position_count(&self) -> usize;

    /// Returns byte length of the underlying buffer.
    fn size_in_bytes(&self) -> usize;

    /// Returns the encoding handle used to serialize this block.
    fn encoding(&self) -> BlockEncoding;

    /// Returns a fresh cursor, positioned before the first position.
    fn cursor(&self) -> Box<dyn BlockCursor>;

    /// Returns a block of positions `[offset, offset + length)`.
    fn region(&self, offset: usize, length: usize) -> Result<BlockRef>;

    fn as_random_access(&self) -> &dyn RandomAccessBlock;

    fn is_null(&self, position: usize) -> bool;

    fn get_boolean(&self, position: usize) -> bool;

    fn get_long(&self, position: usize) -> i64;

    fn get_double(&self, position: usize) -> f64;

    fn get_slice(&self, position: usize) -> Slice;

    /// Returns None if value at given position is null.
    fn get_object_value(&self, position: usize) -> Option<Value>;

    /// Returns a single-position block owning a copy of the entry.
    fn single_value_block(&self, position: usize) -> BlockRef;

    fn equals(&self, position: usize, other: &dyn RandomAccessBlock, other_position: usize)
        -> bool;

    /// Compare value at given position with current value of cursor.
    fn equals_cursor(&self, position: usize, cursor: &dyn BlockCursor) -> bool;

    /// Compare value at given position with encoded payload at
    /// `offset` of `slice`. Both sides must be non-null.
    fn equals_raw(&self, position: usize, slice: &Slice, offset: usize) -> bool;

    fn hash(&self, position: usize) -> u64;

    fn compare_to(
        &self,
        order: SortOrder,
        position: usize,
        other: &dyn RandomAccessBlock,
        other_position: usize,
    ) -> Ordering;

    fn compare_to_cursor(
        &self,
        order: SortOrder,
        position: usize,
        cursor: &dyn BlockCursor,
    ) -> Ordering;

    /// Compare value at given position with encoded payload at
    /// `offset` of `slice`, in ascending order. Both sides must be
    /// non-null.
    fn compare_to_raw(&self, position: usize, slice: &Slice, offset: usize) -> Ordering;

    /// Append value at given position to the builder.
    fn append_tuple_to(&self, position: usize, builder: &mut dyn BlockBuilder);
}

/// Null-aware equality.
/// Two nulls are equal, a null never equals a non-null value.
/// `f` is only invoked when both sides are non-null.
#[inline]
pub fn equals_nullable<F>(left_null: bool, right_null: bool, f: F) -> bool
where
    F: FnOnce() -> bool,
{
    if left_null != right_null {
        return false;
    }
    if left_null {
        return true;
    }
    f()
}

/// Null-aware three-way comparison.
///
/// Null placement is decided by `order.is_nulls_first()` only, and is not
/// affected by direction. `f` returns the ascending ordering of left
/// against right and is only invoked when both sides are non-null; its
/// result is reversed for descending order.
#[inline]
pub fn compare_nullable<F>(order: SortOrder, left_null: bool, right_null: bool, f: F) -> Ordering
where
    F: FnOnce() -> Ordering,
{
    match (left_null, right_null) {
        (true, true) => Ordering::Equal,
        (true, false) => {
            if order.is_nulls_first() {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, true) => {
            if order.is_nulls_first() {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, false) => {
            let res = f();
            if order.is_ascending() {
                res
            } else {
                res.reverse()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_nullable() {
        assert!(equals_nullable(true, true, || unreachable!()));
        assert!(!equals_nullable(true, false, || unreachable!()));
        assert!(!equals_nullable(false, true, || unreachable!()));
        assert!(equals_nullable(false, false, || true));
        assert!(!equals_nullable(false, false, || false));
    }

    #[test]
    fn test_compare_nullable() {
        use Ordering::*;
        use SortOrder::*;
        for order in [AscNullsFirst, AscNullsLast, DescNullsFirst, DescNullsLast] {
            assert_eq!(Equal, compare_nullable(order, true, true, || unreachable!()));
        }
        assert_eq!(Less, compare_nullable(AscNullsFirst, true, false, || unreachable!()));
        assert_eq!(Greater, compare_nullable(AscNullsFirst, false, true, || unreachable!()));
        assert_eq!(Greater, compare_nullable(AscNullsLast, true, false, || unreachable!()));
        assert_eq!(Less, compare_nullable(AscNullsLast, false, true, || unreachable!()));
        // direction does not move nulls
        assert_eq!(Less, compare_nullable(DescNullsFirst, true, false, || unreachable!()));
        assert_eq!(Greater, compare_nullable(DescNullsLast, true, false, || unreachable!()));
        assert_eq!(Less, compare_nullable(AscNullsFirst, false, false, || Less));
        assert_eq!(Greater, compare_nullable(DescNullsFirst, false, false, || Less));
        assert_eq!(Equal, compare_nullable(DescNullsLast, false, false, || Equal));
    }
}
