use crate::block::BlockRef;
use crate::builder::BlockBuilder;
use colblk_common::slice::Slice;
use colblk_datatype::{TupleInfo, Value};
use std::cmp::Ordering;

/// BlockCursor is a forward-only view over positions of a block.
///
/// A new cursor is positioned before the first position, so one of
/// the advance methods must be called before reading.
/// Reading from a cursor that is not on a valid position panics.
pub trait BlockCursor {
    fn tuple_info(&self) -> TupleInfo;

    /// Returns number of positions after the current one.
    fn remaining_positions(&self) -> usize;

    /// Returns true if the cursor is on a readable position.
    fn is_valid(&self) -> bool;

    /// Returns true if the cursor has moved past the last position.
    fn is_finished(&self) -> bool;

    /// Move to next position, returns false if no more positions.
    fn advance_next_position(&mut self) -> bool;

    /// Move forward to given position, returns false if the position
    /// is beyond the last one. Moving backwards panics.
    fn advance_to_position(&mut self, position: usize) -> bool;

    /// Materialize the next `length` positions as a random-access block
    /// and leave the cursor on the last of them.
    /// The length is clamped to the remaining positions.
    fn region_and_advance(&mut self, length: usize) -> BlockRef;

    /// Returns current position.
    fn position(&self) -> usize;

    fn is_null(&self) -> bool;

    fn get_boolean(&self) -> bool;

    fn get_long(&self) -> i64;

    fn get_double(&self) -> f64;

    fn get_slice(&self) -> Slice;

    fn get_object_value(&self) -> Option<Value>;

    /// Compare current value with encoded payload at `offset` of `slice`.
    /// Both sides must be non-null.
    fn equals(&self, slice: &Slice, offset: usize) -> bool;

    /// Ascending ordering of current value against encoded payload
    /// at `offset` of `slice`. Both sides must be non-null.
    fn compare_to(&self, slice: &Slice, offset: usize) -> Ordering;

    fn hash(&self) -> u64;

    fn append_tuple_to(&self, builder: &mut dyn BlockBuilder);
}
