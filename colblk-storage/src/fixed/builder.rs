use super::{checked_entry_size, FixedWidthBlock};
use crate::builder::{BlockBuilder, BlockBuilderConfig};
use crate::konst::{NON_NULL_MARKER, NULL_MARKER};
use crate::tuple::TypeInfoRef;
use colblk_common::byte_repr::ByteRepr;
use colblk_common::error::Result;
use colblk_common::slice::Slice;
use colblk_datatype::{TupleInfo, Type};

/// Builder of [`FixedWidthBlock`].
/// Null entries are written with a zeroed payload.
#[derive(Debug)]
pub struct FixedWidthBlockBuilder {
    type_info: TypeInfoRef,
    entry_size: usize,
    config: BlockBuilderConfig,
    buf: Vec<u8>,
    position_count: usize,
}

impl FixedWidthBlockBuilder {
    pub fn new(type_info: TypeInfoRef, config: BlockBuilderConfig) -> Result<Self> {
        let entry_size = checked_entry_size(type_info.as_ref())?;
        let cap = config
            .expected_positions
            .saturating_mul(entry_size)
            .min(config.max_block_size);
        Ok(FixedWidthBlockBuilder {
            type_info,
            entry_size,
            config,
            buf: Vec::with_capacity(cap),
            position_count: 0,
        })
    }

    /// Build block with all appended values.
    pub fn build(self) -> FixedWidthBlock {
        log::trace!(
            "build fixed-width block of {} with {} positions, {} bytes",
            self.type_info.ty().to_lower(),
            self.position_count,
            self.buf.len()
        );
        FixedWidthBlock::from_parts(
            self.type_info,
            self.entry_size,
            self.position_count,
            Slice::from(self.buf),
        )
    }

    #[inline]
    fn check_type(&self, matches: bool, value: &str) {
        if !matches {
            panic!(
                "cannot append {} to builder of {}",
                value,
                self.type_info.ty().to_lower()
            )
        }
    }

    /// Write one non-null entry.
    #[inline]
    fn push_entry(&mut self, payload: &[u8]) {
        debug_assert_eq!(payload.len() + 1, self.entry_size);
        self.buf.push(NON_NULL_MARKER);
        self.buf.extend_from_slice(payload);
        self.position_count += 1;
    }
}

impl BlockBuilder for FixedWidthBlockBuilder {
    #[inline]
    fn tuple_info(&self) -> TupleInfo {
        self.type_info.tuple_info()
    }

    #[inline]
    fn append_null(&mut self) {
        let start = self.buf.len();
        self.buf.resize(start + self.entry_size, 0);
        self.buf[start] = NULL_MARKER;
        self.position_count += 1;
    }

    #[inline]
    fn append_from(&mut self, slice: &Slice, offset: usize) {
        let width = self.entry_size - 1;
        self.buf.push(NON_NULL_MARKER);
        self.buf.extend_from_slice(slice.get_bytes(offset, width));
        self.position_count += 1;
    }

    #[inline]
    fn append_boolean(&mut self, value: bool) {
        self.check_type(self.type_info.ty() == Type::Boolean, "boolean");
        self.push_entry(&[value as u8]);
    }

    #[inline]
    fn append_long(&mut self, value: i64) {
        self.check_type(self.type_info.ty() == Type::Long, "long");
        self.push_entry(&value.to_bytes());
    }

    #[inline]
    fn append_double(&mut self, value: f64) {
        self.check_type(self.type_info.ty() == Type::Double, "double");
        self.push_entry(&value.to_bytes());
    }

    #[inline]
    fn append_bytes(&mut self, value: &[u8]) {
        let matches =
            matches!(self.type_info.ty(), Type::FixedBytes(n) if n as usize == value.len());
        self.check_type(matches, "bytes");
        self.push_entry(value);
    }

    #[inline]
    fn position_count(&self) -> usize {
        self.position_count
    }

    #[inline]
    fn size_in_bytes(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.buf.len() >= self.config.max_block_size
    }
}
