//! Fixed-width columnar blocks.
//!
//! A block holds one column's values for a run of positions.
//! Values of fixed-size types are packed into a single contiguous
//! byte buffer, each entry prefixed with a one-byte null marker.
//! Blocks are immutable and can be compared, hashed and serialized
//! without decoding values into objects.
pub mod block;
pub mod builder;
pub mod cursor;
pub mod encoding;
pub mod fixed;
pub mod konst;
pub mod tuple;

pub mod prelude {
    pub use crate::block::*;
    pub use crate::builder::*;
    pub use crate::cursor::*;
    pub use crate::encoding::*;
    pub use crate::fixed::*;
    pub use crate::tuple::*;
    pub use colblk_common::error::*;
    pub use colblk_common::slice::Slice;
    pub use colblk_datatype::{SortOrder, TupleInfo, Type, Value};
}
