use super::{checked_entry_size, is_null_entry, FixedWidthBlockCursor};
use crate::block::{compare_nullable, equals_nullable, BlockRef, RandomAccessBlock};
use crate::builder::BlockBuilder;
use crate::cursor::BlockCursor;
use crate::encoding::BlockEncoding;
use crate::konst::{NULL_HASH, NULL_MARKER_SIZE};
use crate::tuple::TypeInfoRef;
use colblk_common::error::{position_out_of_range, Error, Result};
use colblk_common::slice::Slice;
use colblk_datatype::{SortOrder, TupleInfo, Value};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// FixedWidthBlock is an immutable, random-access block of
/// fixed-width values with inline null markers.
///
/// Cloning a block is shallow, the buffer is shared with the clone.
/// Regions share the buffer as well, only
/// [`single_value`](FixedWidthBlock::single_value) copies bytes.
#[derive(Clone)]
pub struct FixedWidthBlock {
    type_info: TypeInfoRef,
    entry_size: usize,
    slice: Slice,
    position_count: usize,
}

impl FixedWidthBlock {
    /// Create a block over a prebuilt buffer.
    ///
    /// The buffer should hold at least `position_count` entries.
    /// This is trusted rather than verified, reads beyond the buffer
    /// panic.
    pub fn new(type_info: TypeInfoRef, position_count: usize, slice: Slice) -> Result<Self> {
        let entry_size = checked_entry_size(type_info.as_ref())?;
        if position_count.checked_mul(entry_size).is_none() {
            return Err(Error::InvalidArgument(format!(
                "position count {} overflows with entry size {}",
                position_count, entry_size
            )));
        }
        Ok(FixedWidthBlock::from_parts(
            type_info,
            entry_size,
            position_count,
            slice,
        ))
    }

    /// Caller must guarantee entry size matches type width.
    #[inline]
    pub(crate) fn from_parts(
        type_info: TypeInfoRef,
        entry_size: usize,
        position_count: usize,
        slice: Slice,
    ) -> Self {
        debug_assert_eq!(entry_size, super::entry_size(type_info.width()));
        FixedWidthBlock {
            type_info,
            entry_size,
            slice,
            position_count,
        }
    }

    #[inline]
    pub fn type_info(&self) -> &TypeInfoRef {
        &self.type_info
    }

    /// Returns byte size of a single entry, including null marker.
    #[inline]
    pub fn entry_size(&self) -> usize {
        self.entry_size
    }

    /// Returns the underlying buffer.
    #[inline]
    pub fn raw_slice(&self) -> &Slice {
        &self.slice
    }

    /// Returns a typed cursor, positioned before the first position.
    #[inline]
    pub fn fixed_cursor(&self) -> FixedWidthBlockCursor {
        FixedWidthBlockCursor::new(
            Arc::clone(&self.type_info),
            self.position_count,
            self.slice.clone(),
        )
    }

    /// Returns a block of positions `[offset, offset + length)`.
    ///
    /// The region is cut by a cursor, so block regions and cursor
    /// regions share one definition.
    pub fn region_block(&self, offset: usize, length: usize) -> Result<FixedWidthBlock> {
        match offset.checked_add(length) {
            Some(end) if end <= self.position_count => (),
            _ => {
                return Err(Error::OutOfBounds {
                    offset,
                    length,
                    count: self.position_count,
                })
            }
        }
        let mut cursor = self.fixed_cursor();
        if offset > 0 {
            cursor.advance_to_position(offset - 1);
        }
        let region = cursor.advance_region(length);
        log::trace!(
            "cut region [{}, {}) of block with {} positions",
            offset,
            offset + length,
            self.position_count
        );
        Ok(region)
    }

    /// Returns a single-position block owning a copy of the entry.
    pub fn single_value(&self, position: usize) -> FixedWidthBlock {
        let entry_offset = self.check_readable_position(position);
        let copy = Slice::copy_of(self.slice.get_bytes(entry_offset, self.entry_size));
        FixedWidthBlock::from_parts(Arc::clone(&self.type_info), self.entry_size, 1, copy)
    }

    /// Returns entry offset of a readable position.
    #[inline]
    fn check_readable_position(&self, position: usize) -> usize {
        if position >= self.position_count {
            position_out_of_range(position, self.position_count)
        }
        position * self.entry_size
    }

    /// Returns payload offset of a readable position.
    #[inline]
    fn payload_offset(&self, position: usize) -> usize {
        self.check_readable_position(position) + NULL_MARKER_SIZE
    }
}

impl RandomAccessBlock for FixedWidthBlock {
    #[inline]
    fn tuple_info(&self) -> TupleInfo {
        self.type_info.tuple_info()
    }

    #[inline]
    fn position_count(&self) -> usize {
        self.position_count
    }

    #[inline]
    fn size_in_bytes(&self) -> usize {
        self.slice.len()
    }

    #[inline]
    fn encoding(&self) -> BlockEncoding {
        BlockEncoding::Uncompressed(self.tuple_info())
    }

    #[inline]
    fn cursor(&self) -> Box<dyn BlockCursor> {
        Box::new(self.fixed_cursor())
    }

    #[inline]
    fn region(&self, offset: usize, length: usize) -> Result<BlockRef> {
        self.region_block(offset, length).map(|b| Arc::new(b) as BlockRef)
    }

    #[inline]
    fn as_random_access(&self) -> &dyn RandomAccessBlock {
        self
    }

    #[inline]
    fn is_null(&self, position: usize) -> bool {
        let entry_offset = self.check_readable_position(position);
        is_null_entry(&self.slice, entry_offset)
    }

    #[inline]
    fn get_boolean(&self, position: usize) -> bool {
        let offset = self.payload_offset(position);
        self.type_info.get_boolean(&self.slice, offset)
    }

    #[inline]
    fn get_long(&self, position: usize) -> i64 {
        let offset = self.payload_offset(position);
        self.type_info.get_long(&self.slice, offset)
    }

    #[inline]
    fn get_double(&self, position: usize) -> f64 {
        let offset = self.payload_offset(position);
        self.type_info.get_double(&self.slice, offset)
    }

    #[inline]
    fn get_slice(&self, position: usize) -> Slice {
        let offset = self.payload_offset(position);
        self.type_info.get_slice(&self.slice, offset)
    }

    #[inline]
    fn get_object_value(&self, position: usize) -> Option<Value> {
        let entry_offset = self.check_readable_position(position);
        if is_null_entry(&self.slice, entry_offset) {
            return None;
        }
        Some(self.type_info.get_object_value(&self.slice, entry_offset + NULL_MARKER_SIZE))
    }

    #[inline]
    fn single_value_block(&self, position: usize) -> BlockRef {
        Arc::new(self.single_value(position))
    }

    fn equals(
        &self,
        position: usize,
        other: &dyn RandomAccessBlock,
        other_position: usize,
    ) -> bool {
        let entry_offset = self.check_readable_position(position);
        let left_null = is_null_entry(&self.slice, entry_offset);
        let right_null = other.is_null(other_position);
        equals_nullable(left_null, right_null, || {
            other.equals_raw(other_position, &self.slice, entry_offset + NULL_MARKER_SIZE)
        })
    }

    fn equals_cursor(&self, position: usize, cursor: &dyn BlockCursor) -> bool {
        let entry_offset = self.check_readable_position(position);
        let left_null = is_null_entry(&self.slice, entry_offset);
        equals_nullable(left_null, cursor.is_null(), || {
            self.type_info.equals_cursor(&self.slice, entry_offset + NULL_MARKER_SIZE, cursor)
        })
    }

    #[inline]
    fn equals_raw(&self, position: usize, slice: &Slice, offset: usize) -> bool {
        let payload_offset = self.payload_offset(position);
        self.type_info.equals(&self.slice, payload_offset, slice, offset)
    }

    #[inline]
    fn hash(&self, position: usize) -> u64 {
        let entry_offset = self.check_readable_position(position);
        if is_null_entry(&self.slice, entry_offset) {
            return NULL_HASH;
        }
        self.type_info.hash(&self.slice, entry_offset + NULL_MARKER_SIZE)
    }

    fn compare_to(
        &self,
        order: SortOrder,
        position: usize,
        other: &dyn RandomAccessBlock,
        other_position: usize,
    ) -> Ordering {
        let entry_offset = self.check_readable_position(position);
        let left_null = is_null_entry(&self.slice, entry_offset);
        let right_null = other.is_null(other_position);
        compare_nullable(order, left_null, right_null, || {
            // the other block compares itself against our bytes
            other
                .compare_to_raw(other_position, &self.slice, entry_offset + NULL_MARKER_SIZE)
                .reverse()
        })
    }

    fn compare_to_cursor(
        &self,
        order: SortOrder,
        position: usize,
        cursor: &dyn BlockCursor,
    ) -> Ordering {
        let entry_offset = self.check_readable_position(position);
        let left_null = is_null_entry(&self.slice, entry_offset);
        compare_nullable(order, left_null, cursor.is_null(), || {
            cursor
                .compare_to(&self.slice, entry_offset + NULL_MARKER_SIZE)
                .reverse()
        })
    }

    #[inline]
    fn compare_to_raw(&self, position: usize, slice: &Slice, offset: usize) -> Ordering {
        let payload_offset = self.payload_offset(position);
        self.type_info.compare(&self.slice, payload_offset, slice, offset)
    }

    fn append_tuple_to(&self, position: usize, builder: &mut dyn BlockBuilder) {
        let entry_offset = self.check_readable_position(position);
        if is_null_entry(&self.slice, entry_offset) {
            builder.append_null();
        } else {
            self.type_info.append_to(&self.slice, entry_offset + NULL_MARKER_SIZE, builder);
        }
    }
}

impl fmt::Debug for FixedWidthBlock {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedWidthBlock")
            .field("type", &self.type_info.ty())
            .field("position_count", &self.position_count)
            .field("slice", &self.slice)
            .finish()
    }
}
