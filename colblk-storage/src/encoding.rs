use crate::block::{BlockRef, RandomAccessBlock};
use crate::builder::BlockBuilderConfig;
use crate::fixed::{FixedWidthBlock, FixedWidthBlockBuilder};
use crate::tuple::TypeInfo;
use colblk_common::byte_repr::ByteRepr;
use colblk_common::error::{Error, Result};
use colblk_common::slice::Slice;
use colblk_datatype::{TupleInfo, Type};
use std::sync::Arc;

const ENCODING_UNCOMPRESSED: u8 = 1;

const TYPE_TAG_BOOLEAN: u8 = 1;
const TYPE_TAG_LONG: u8 = 2;
const TYPE_TAG_DOUBLE: u8 = 3;
const TYPE_TAG_FIXED_BYTES: u8 = 4;

const BLOCK_HEADER_SIZE: usize = 8;

/// BlockEncoding identifies how a block is serialized.
/// It carries type information only, never data.
///
/// Serialized encoding:
///
/// ```text
/// encoding := kind(u8) type_tag(u8) [width(u16le), fixed bytes only]
/// ```
///
/// Serialized uncompressed block:
///
/// ```text
/// block := position_count(u32le) byte_len(u32le) entries
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockEncoding {
    Uncompressed(TupleInfo),
}

impl BlockEncoding {
    #[inline]
    pub fn tuple_info(&self) -> TupleInfo {
        match self {
            BlockEncoding::Uncompressed(ti) => *ti,
        }
    }

    /// Write encoding descriptor, returns number of bytes written.
    pub fn write_encoding(&self, out: &mut Vec<u8>) -> usize {
        let start = out.len();
        match self {
            BlockEncoding::Uncompressed(ti) => {
                out.push(ENCODING_UNCOMPRESSED);
                match ti.ty() {
                    Type::Boolean => out.push(TYPE_TAG_BOOLEAN),
                    Type::Long => out.push(TYPE_TAG_LONG),
                    Type::Double => out.push(TYPE_TAG_DOUBLE),
                    Type::FixedBytes(n) => {
                        out.push(TYPE_TAG_FIXED_BYTES);
                        out.extend_from_slice(&n.to_bytes());
                    }
                }
            }
        }
        out.len() - start
    }

    /// Read encoding descriptor, returns the encoding and number of
    /// bytes consumed.
    pub fn read_encoding(input: &[u8]) -> Result<(Self, usize)> {
        let (kind, tag) = match input {
            [kind, tag, ..] => (*kind, *tag),
            _ => return Err(Error::InvalidFormat),
        };
        if kind != ENCODING_UNCOMPRESSED {
            return Err(Error::InvalidFormat);
        }
        let (ty, consumed) = match tag {
            TYPE_TAG_BOOLEAN => (Type::Boolean, 2),
            TYPE_TAG_LONG => (Type::Long, 2),
            TYPE_TAG_DOUBLE => (Type::Double, 2),
            TYPE_TAG_FIXED_BYTES => {
                let n = u16::from_bytes(input.get(2..4).ok_or(Error::InvalidFormat)?);
                let ty = Type::fixed_bytes(n).map_err(|_| Error::InvalidFormat)?;
                (ty, 4)
            }
            _ => return Err(Error::InvalidFormat),
        };
        Ok((BlockEncoding::Uncompressed(TupleInfo::single(ty)), consumed))
    }

    /// Serialize block, returns number of bytes written.
    ///
    /// Every position is replayed through a builder, so blocks of any
    /// representation can be written as long as the tuple info matches.
    pub fn write_block(
        &self,
        block: &dyn RandomAccessBlock,
        out: &mut Vec<u8>,
    ) -> Result<usize> {
        let tuple_info = self.tuple_info();
        if block.tuple_info() != tuple_info {
            return Err(Error::InvalidArgument(format!(
                "cannot write block of {} with encoding of {}",
                block.tuple_info().ty().to_lower(),
                tuple_info.ty().to_lower()
            )));
        }
        let position_count = block.position_count();
        let n_positions = u32::try_from(position_count).map_err(|_| {
            Error::InvalidArgument(format!("too many positions {}", position_count))
        })?;
        let config = BlockBuilderConfig::default().with_expected_positions(position_count);
        let mut builder =
            FixedWidthBlockBuilder::new(TypeInfo::new_ref(tuple_info.ty()), config)?;
        for position in 0..position_count {
            block.append_tuple_to(position, &mut builder);
        }
        let rebuilt = builder.build();
        let data = rebuilt.raw_slice().as_bytes();
        let byte_len = u32::try_from(data.len())
            .map_err(|_| Error::InvalidArgument(format!("block too large {}", data.len())))?;
        let mut header = [0u8; BLOCK_HEADER_SIZE];
        n_positions.write_bytes(&mut header[..4]);
        byte_len.write_bytes(&mut header[4..]);
        let start = out.len();
        out.extend_from_slice(&header);
        out.extend_from_slice(data);
        log::debug!(
            "write uncompressed block of {} with {} positions, {} bytes",
            tuple_info.ty().to_lower(),
            position_count,
            data.len()
        );
        Ok(out.len() - start)
    }

    /// Deserialize block, returns the block and number of bytes consumed.
    /// The block owns a copy of its entries.
    pub fn read_block(&self, input: &[u8]) -> Result<(BlockRef, usize)> {
        let block = self.read_fixed_block(input)?;
        let consumed = BLOCK_HEADER_SIZE + block.size_in_bytes();
        Ok((Arc::new(block), consumed))
    }

    fn read_fixed_block(&self, input: &[u8]) -> Result<FixedWidthBlock> {
        let header: [u8; BLOCK_HEADER_SIZE] =
            input[..input.len().min(BLOCK_HEADER_SIZE)].try_into()?;
        let position_count = u32::from_bytes(&header[..4]) as usize;
        let byte_len = u32::from_bytes(&header[4..]) as usize;
        let ty = self.tuple_info().ty();
        let expected = position_count
            .checked_mul(ty.fixed_width() + 1)
            .ok_or(Error::InvalidFormat)?;
        if byte_len != expected {
            return Err(Error::InvalidFormat);
        }
        let data = input
            .get(BLOCK_HEADER_SIZE..BLOCK_HEADER_SIZE + byte_len)
            .ok_or(Error::InvalidFormat)?;
        log::debug!(
            "read uncompressed block of {} with {} positions, {} bytes",
            ty.to_lower(),
            position_count,
            byte_len
        );
        FixedWidthBlock::new(TypeInfo::new_ref(ty), position_count, Slice::copy_of(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BlockBuilder;
    use colblk_datatype::Value;

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
    fn test_encoding_descriptor() {
        for ty in [Type::Boolean, Type::Long, Type::Double, Type::FixedBytes(300)] {
            let enc = BlockEncoding::Uncompressed(TupleInfo::single(ty));
            let mut out = vec![];
            let n = enc.write_encoding(&mut out);
            assert_eq!(n, out.len());
            let (dec, consumed) = BlockEncoding::read_encoding(&out).unwrap();
            assert_eq!(enc, dec);
            assert_eq!(n, consumed);
        }
        assert_eq!(
            Err(Error::InvalidFormat),
            BlockEncoding::read_encoding(&[ENCODING_UNCOMPRESSED])
        );
        assert_eq!(Err(Error::InvalidFormat), BlockEncoding::read_encoding(&[9, 2]));
        assert_eq!(
            Err(Error::InvalidFormat),
            BlockEncoding::read_encoding(&[ENCODING_UNCOMPRESSED, TYPE_TAG_FIXED_BYTES, 0, 0])
        );
    }

    #[test]
    fn test_write_and_read_block() {
        let block = long_block(&[None, Some(42), Some(-7)]);
        let enc = block.encoding();
        let mut out = vec![0xee];
        let n = enc.write_block(&block, &mut out).unwrap();
        assert_eq!(8 + 27, n);
        assert_eq!(&3u32.to_le_bytes()[..], &out[1..5]);
        assert_eq!(&block.raw_slice().as_bytes()[..], &out[9..]);
        let (dec, consumed) = enc.read_block(&out[1..]).unwrap();
        assert_eq!(n, consumed);
        assert_eq!(3, dec.position_count());
        assert_eq!(None, dec.get_object_value(0));
        assert_eq!(Some(Value::Long(42)), dec.get_object_value(1));
        assert_eq!(Some(Value::Long(-7)), dec.get_object_value(2));
    }

    #[test]
    fn test_write_region_block() {
        let block = long_block(&[Some(1), Some(2), Some(3), None]);
        let region = block.region(1, 3).unwrap();
        let mut out = vec![];
        region.encoding().write_block(region.as_ref(), &mut out).unwrap();
        let (dec, _) = region.encoding().read_block(&out).unwrap();
        for i in 0..3 {
            assert_eq!(region.get_object_value(i), dec.get_object_value(i));
        }
    }

    #[test]
    fn test_read_block_invalid() {
        let enc = BlockEncoding::Uncompressed(TupleInfo::single(Type::Long));
        assert!(matches!(enc.read_block(&[]), Err(Error::InvalidFormat)));
        assert!(matches!(enc.read_block(&[1, 0, 0]), Err(Error::InvalidFormat)));
        // header cut right before its last byte
        let mut out = vec![];
        enc.write_block(&long_block(&[Some(1)]), &mut out).unwrap();
        assert!(matches!(enc.read_block(&out[..7]), Err(Error::InvalidFormat)));
        let mut out = vec![];
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&17u32.to_le_bytes());
        out.extend_from_slice(&[0; 17]);
        assert!(matches!(enc.read_block(&out), Err(Error::InvalidFormat)));
        let mut out = vec![];
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&18u32.to_le_bytes());
        out.extend_from_slice(&[0; 10]);
        assert!(matches!(enc.read_block(&out), Err(Error::InvalidFormat)));
    }

    #[test]
    fn test_write_block_type_mismatch() {
        let block = long_block(&[Some(1)]);
        let enc = BlockEncoding::Uncompressed(TupleInfo::single(Type::Double));
        let mut out = vec![];
        assert!(matches!(
            enc.write_block(&block, &mut out),
            Err(Error::InvalidArgument(_))
        ));
        assert!(out.is_empty());
    }
}
