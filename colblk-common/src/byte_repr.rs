use smallvec::{smallvec, SmallVec};

/// Fixed-size primitive with a little-endian binary representation.
/// All multi-byte values inside a block buffer use this encoding,
/// independent of the host endianness.
pub trait ByteRepr: Default + Copy {
    /// Number of bytes of the encoded value.
    const N_BYTES: usize;

    /// Convert value to byte vector.
    fn to_bytes(&self) -> SmallVec<[u8; 16]>;

    /// Convert bytes to value.
    /// Input length must be identical to `N_BYTES`.
    fn from_bytes(bs: &[u8]) -> Self;

    /// Write value into byte format.
    fn write_bytes(&self, buf: &mut [u8]);
}

macro_rules! impl_num_for_byte_repr {
    ($ty:ty) => {
        impl ByteRepr for $ty {
            const N_BYTES: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn to_bytes(&self) -> SmallVec<[u8; 16]> {
                self.to_le_bytes().into_iter().collect()
            }

            #[inline]
            fn from_bytes(bs: &[u8]) -> Self {
                let mut arr = [0u8; std::mem::size_of::<$ty>()];
                arr.copy_from_slice(bs);
                <$ty>::from_le_bytes(arr)
            }

            #[inline]
            fn write_bytes(&self, buf: &mut [u8]) {
                let bs = self.to_le_bytes();
                buf.copy_from_slice(&bs);
            }
        }
    };
}

impl_num_for_byte_repr!(u16);
impl_num_for_byte_repr!(u32);
impl_num_for_byte_repr!(i64);
impl_num_for_byte_repr!(f64);

impl ByteRepr for u8 {
    const N_BYTES: usize = 1;

    #[inline]
    fn to_bytes(&self) -> SmallVec<[u8; 16]> {
        smallvec![*self]
    }

    #[inline]
    fn from_bytes(bs: &[u8]) -> Self {
        bs[0]
    }

    #[inline]
    fn write_bytes(&self, buf: &mut [u8]) {
        buf[0] = *self;
    }
}
