/// Byte size of the null marker preceding each entry.
pub const NULL_MARKER_SIZE: usize = 1;

/// Null marker of a non-null entry. Any other byte means null.
pub const NON_NULL_MARKER: u8 = 0x00;

/// Null marker written by builders.
pub const NULL_MARKER: u8 = 0x01;

/// All null values hash to this constant.
pub const NULL_HASH: u64 = 0;

/// Default byte size at which a builder reports full.
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 64 * 1024;

/// Default number of positions a builder reserves space for.
pub const DEFAULT_EXPECTED_POSITIONS: usize = 1024;
