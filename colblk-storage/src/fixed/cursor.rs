use super::{entry_size, is_null_entry, FixedWidthBlock};
use crate::block::BlockRef;
use crate::builder::BlockBuilder;
use crate::cursor::BlockCursor;
use crate::konst::{NULL_HASH, NULL_MARKER_SIZE};
use crate::tuple::TypeInfoRef;
use colblk_common::slice::Slice;
use colblk_datatype::{TupleInfo, Value};
use std::cmp::Ordering;
use std::sync::Arc;

/// Forward-only cursor over a fixed-width buffer.
#[derive(Debug, Clone)]
pub struct FixedWidthBlockCursor {
    type_info: TypeInfoRef,
    entry_size: usize,
    position_count: usize,
    slice: Slice,
    /// None before the first position,
    /// `position_count` once finished.
    position: Option<usize>,
}

impl FixedWidthBlockCursor {
    #[inline]
    pub fn new(type_info: TypeInfoRef, position_count: usize, slice: Slice) -> Self {
        let entry_size = entry_size(type_info.width());
        FixedWidthBlockCursor {
            type_info,
            entry_size,
            position_count,
            slice,
            position: None,
        }
    }

    /// Materialize the next `length` positions, clamped to the remaining
    /// ones, as a block sharing this cursor's buffer.
    /// The cursor stays on the last materialized position, and does
    /// not move if nothing is materialized.
    pub fn advance_region(&mut self, length: usize) -> FixedWidthBlock {
        let start = self.next_position();
        let length = length.min(self.position_count - start);
        let slice = self
            .slice
            .slice(start * self.entry_size, length * self.entry_size);
        if length > 0 {
            self.position = Some(start + length - 1);
        }
        FixedWidthBlock::from_parts(Arc::clone(&self.type_info), self.entry_size, length, slice)
    }

    /// Returns index of the position after the current one.
    #[inline]
    fn next_position(&self) -> usize {
        match self.position {
            None => 0,
            Some(p) => (p + 1).min(self.position_count),
        }
    }

    /// Returns entry offset of current position.
    #[inline]
    fn check_readable(&self) -> usize {
        match self.position {
            Some(p) if p < self.position_count => p * self.entry_size,
            _ => cursor_not_readable(self.position, self.position_count),
        }
    }

    #[inline]
    fn payload_offset(&self) -> usize {
        self.check_readable() + NULL_MARKER_SIZE
    }
}

#[cold]
#[inline(never)]
fn cursor_not_readable(position: Option<usize>, count: usize) -> ! {
    match position {
        None => panic!("cursor has not been advanced"),
        Some(_) => panic!("cursor is finished after {} positions", count),
    }
}

impl BlockCursor for FixedWidthBlockCursor {
    #[inline]
    fn tuple_info(&self) -> TupleInfo {
        self.type_info.tuple_info()
    }

    #[inline]
    fn remaining_positions(&self) -> usize {
        self.position_count - self.next_position()
    }

    #[inline]
    fn is_valid(&self) -> bool {
        matches!(self.position, Some(p) if p < self.position_count)
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.position == Some(self.position_count)
    }

    #[inline]
    fn advance_next_position(&mut self) -> bool {
        let next = self.next_position();
        if next >= self.position_count {
            self.position = Some(self.position_count);
            return false;
        }
        self.position = Some(next);
        true
    }

    fn advance_to_position(&mut self, position: usize) -> bool {
        if let Some(p) = self.position {
            assert!(position >= p, "cannot advance backwards from {} to {}", p, position);
        }
        if position >= self.position_count {
            self.position = Some(self.position_count);
            return false;
        }
        self.position = Some(position);
        true
    }

    #[inline]
    fn region_and_advance(&mut self, length: usize) -> BlockRef {
        Arc::new(self.advance_region(length))
    }

    #[inline]
    fn position(&self) -> usize {
        self.check_readable();
        self.position.unwrap_or_default()
    }

    #[inline]
    fn is_null(&self) -> bool {
        let entry_offset = self.check_readable();
        is_null_entry(&self.slice, entry_offset)
    }

    #[inline]
    fn get_boolean(&self) -> bool {
        self.type_info.get_boolean(&self.slice, self.payload_offset())
    }

    #[inline]
    fn get_long(&self) -> i64 {
        self.type_info.get_long(&self.slice, self.payload_offset())
    }

    #[inline]
    fn get_double(&self) -> f64 {
        self.type_info.get_double(&self.slice, self.payload_offset())
    }

    #[inline]
    fn get_slice(&self) -> Slice {
        self.type_info.get_slice(&self.slice, self.payload_offset())
    }

    #[inline]
    fn get_object_value(&self) -> Option<Value> {
        let entry_offset = self.check_readable();
        if is_null_entry(&self.slice, entry_offset) {
            return None;
        }
        Some(self.type_info.get_object_value(&self.slice, entry_offset + NULL_MARKER_SIZE))
    }

    #[inline]
    fn equals(&self, slice: &Slice, offset: usize) -> bool {
        self.type_info
            .equals(&self.slice, self.payload_offset(), slice, offset)
    }

    #[inline]
    fn compare_to(&self, slice: &Slice, offset: usize) -> Ordering {
        self.type_info
            .compare(&self.slice, self.payload_offset(), slice, offset)
    }

    #[inline]
    fn hash(&self) -> u64 {
        let entry_offset = self.check_readable();
        if is_null_entry(&self.slice, entry_offset) {
            return NULL_HASH;
        }
        self.type_info
            .hash(&self.slice, entry_offset + NULL_MARKER_SIZE)
    }

    fn append_tuple_to(&self, builder: &mut dyn BlockBuilder) {
        let entry_offset = self.check_readable();
        if is_null_entry(&self.slice, entry_offset) {
            builder.append_null();
        } else {
            self.type_info
                .append_to(&self.slice, entry_offset + NULL_MARKER_SIZE, builder);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::RandomAccessBlock;
    use crate::builder::BlockBuilderConfig;
    use crate::fixed::FixedWidthBlockBuilder;
    use crate::tuple::TypeInfo;
    use colblk_datatype::Type;

    fn long_block(vals: &[Option<i64>]) -> FixedWidthBlock {
        let mut builder = FixedWidthBlockBuilder::new(
            TypeInfo::new_ref(Type::Long),
            BlockBuilderConfig::default(),
        )
        .unwrap();
        for v in vals {
            match v {
                Some(v) => builder.append_long(*v),
                None => builder.append_null(),
            }
        }
        builder.build()
    }

    #[test]
    fn test_cursor_iterate() {
        let block = long_block(&[Some(1), None, Some(3)]);
        let mut cursor = block.fixed_cursor();
        assert!(!cursor.is_valid());
        assert!(!cursor.is_finished());
        assert_eq!(3, cursor.remaining_positions());
        let mut res = vec![];
        while cursor.advance_next_position() {
            assert!(cursor.is_valid());
            res.push(cursor.get_object_value());
        }
        assert_eq!(vec![Some(Value::Long(1)), None, Some(Value::Long(3))], res);
        assert!(cursor.is_finished());
        assert!(!cursor.is_valid());
        assert_eq!(0, cursor.remaining_positions());
        assert!(!cursor.advance_next_position());
    }

    #[test]
    fn test_cursor_advance_to_position() {
        let block = long_block(&[Some(10), Some(20), Some(30), Some(40)]);
        let mut cursor = block.fixed_cursor();
        assert!(cursor.advance_to_position(2));
        assert_eq!(2, cursor.position());
        assert_eq!(30, cursor.get_long());
        assert_eq!(1, cursor.remaining_positions());
        assert!(cursor.advance_to_position(2));
        assert!(!cursor.advance_to_position(4));
        assert!(cursor.is_finished());
    }

    #[test]
    #[should_panic(expected = "cannot advance backwards")]
    fn test_cursor_advance_backwards() {
        let block = long_block(&[Some(10), Some(20)]);
        let mut cursor = block.fixed_cursor();
        cursor.advance_to_position(1);
        cursor.advance_to_position(0);
    }

    #[test]
    #[should_panic(expected = "cursor has not been advanced")]
    fn test_cursor_read_before_first() {
        let block = long_block(&[Some(10)]);
        block.fixed_cursor().get_long();
    }

    #[test]
    fn test_cursor_region_and_advance() {
        let block = long_block(&[Some(1), Some(2), None, Some(4), Some(5)]);
        let mut cursor = block.fixed_cursor();
        let r1 = cursor.region_and_advance(2);
        assert_eq!(2, r1.position_count());
        assert_eq!(1, r1.get_long(0));
        assert_eq!(2, r1.get_long(1));
        assert_eq!(1, cursor.position());
        let r2 = cursor.advance_region(10);
        assert_eq!(3, r2.position_count());
        assert!(r2.is_null(0));
        assert_eq!(5, r2.get_long(2));
        assert!(r2.raw_slice().shares_buffer(block.raw_slice()));
        assert_eq!(4, cursor.position());
        let r3 = cursor.advance_region(1);
        assert_eq!(0, r3.position_count());
        assert_eq!(4, cursor.position());
    }

    #[test]
    fn test_cursor_compare_and_hash() {
        let block = long_block(&[Some(5), Some(9), None]);
        let mut cursor = block.fixed_cursor();
        cursor.advance_next_position();
        let raw = block.raw_slice();
        let entry = block.entry_size();
        assert!(cursor.equals(raw, NULL_MARKER_SIZE));
        assert_eq!(Ordering::Less, cursor.compare_to(raw, entry + NULL_MARKER_SIZE));
        assert_eq!(block.hash(0), cursor.hash());
        cursor.advance_to_position(2);
        assert!(cursor.is_null());
        assert_eq!(block.hash(2), cursor.hash());
    }

    #[test]
    fn test_cursor_append_tuple() {
        let block = long_block(&[None, Some(-3)]);
        let mut builder = FixedWidthBlockBuilder::new(
            TypeInfo::new_ref(Type::Long),
            BlockBuilderConfig::default(),
        )
        .unwrap();
        let mut cursor = block.fixed_cursor();
        while cursor.advance_next_position() {
            cursor.append_tuple_to(&mut builder);
        }
        let copy = builder.build();
        assert_eq!(block.raw_slice(), copy.raw_slice());
    }
}
