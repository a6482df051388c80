use crate::konst::{DEFAULT_EXPECTED_POSITIONS, DEFAULT_MAX_BLOCK_SIZE};
use colblk_common::slice::Slice;
use colblk_datatype::TupleInfo;

/// BlockBuilder accumulates values, including nulls, to build a block.
///
/// Appending a value whose type differs from the builder's tuple
/// info is a caller bug and panics.
pub trait BlockBuilder {
    fn tuple_info(&self) -> TupleInfo;

    fn append_null(&mut self);

    /// Append a non-null value by copying its encoded payload
    /// at `offset` of `slice`.
    fn append_from(&mut self, slice: &Slice, offset: usize);

    fn append_boolean(&mut self, value: bool);

    fn append_long(&mut self, value: i64);

    fn append_double(&mut self, value: f64);

    fn append_bytes(&mut self, value: &[u8]);

    fn position_count(&self) -> usize;

    fn size_in_bytes(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.position_count() == 0
    }

    /// Returns true once the builder reaches its configured
    /// maximum block size.
    fn is_full(&self) -> bool;
}

/// Configuration of block builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBuilderConfig {
    /// Byte size at which the builder reports full.
    pub max_block_size: usize,
    /// Number of positions to reserve space for.
    pub expected_positions: usize,
}

impl Default for BlockBuilderConfig {
    #[inline]
    fn default() -> Self {
        BlockBuilderConfig {
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
            expected_positions: DEFAULT_EXPECTED_POSITIONS,
        }
    }
}

impl BlockBuilderConfig {
    #[inline]
    pub fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    #[inline]
    pub fn with_expected_positions(mut self, expected_positions: usize) -> Self {
        self.expected_positions = expected_positions;
        self
    }
}
