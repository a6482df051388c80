//! Uncompressed fixed-width representation.
//!
//! The buffer is a concatenation of entries of identical size:
//!
//! ```text
//! buffer := entry_0 entry_1 ... entry_{n-1}
//! entry  := null_marker(1 byte) payload(width bytes)
//! ```
//!
//! A zero null marker means the payload holds a value. Any other
//! marker byte means null, and the payload is ignored.
mod block;
mod builder;
mod cursor;

pub use block::FixedWidthBlock;
pub use builder::FixedWidthBlockBuilder;
pub use cursor::FixedWidthBlockCursor;

use crate::konst::{NON_NULL_MARKER, NULL_MARKER_SIZE};
use crate::tuple::FixedWidthTypeInfo;
use colblk_common::error::{Error, Result};
use colblk_common::slice::Slice;

/// Returns entry size of given payload width.
#[inline]
pub(crate) fn entry_size(width: usize) -> usize {
    width + NULL_MARKER_SIZE
}

/// Returns entry size of a type descriptor, rejecting widths that
/// cannot form an entry.
#[inline]
pub(crate) fn checked_entry_size(type_info: &dyn FixedWidthTypeInfo) -> Result<usize> {
    let width = type_info.width();
    if width == 0 {
        return Err(Error::InvalidArgument(format!(
            "type {} has zero width",
            type_info.ty().to_lower()
        )));
    }
    width.checked_add(NULL_MARKER_SIZE).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "width {} of type {} overflows entry size",
            width,
            type_info.ty().to_lower()
        ))
    })
}

/// Returns true if the entry starting at `entry_offset` is null.
#[inline]
pub(crate) fn is_null_entry(slice: &Slice, entry_offset: usize) -> bool {
    slice.get_u8(entry_offset) != NON_NULL_MARKER
}
