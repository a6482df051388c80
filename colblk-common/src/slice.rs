use crate::byte_repr::ByteRepr;
use std::fmt;
use std::sync::Arc;

/// Slice is an immutable window on a shared byte buffer.
///
/// Cloning a slice, or taking a sub-slice of it, never copies
/// the underlying bytes. The buffer is released when the last
/// slice referring to it is dropped.
/// Use [`Slice::copy_of`] if an independent buffer is required.
#[derive(Clone)]
pub struct Slice {
    /// Shared pointer holding immutable byte array.
    ptr: Arc<[u8]>,
    /// start offset from pointer
    start: usize,
    /// end offset from pointer
    end: usize,
}

impl Slice {
    /// Create a slice covering the whole buffer.
    #[inline]
    pub fn new(ptr: Arc<[u8]>) -> Self {
        let end = ptr.len();
        Slice { ptr, start: 0, end }
    }

    /// Create an empty slice.
    #[inline]
    pub fn empty() -> Self {
        Slice::new(Arc::from(Vec::new()))
    }

    /// Allocate a new buffer and copy given bytes into it.
    #[inline]
    pub fn copy_of(bs: &[u8]) -> Self {
        Slice::new(Arc::from(bs))
    }

    /// Returns byte length of this slice.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns raw byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.ptr[self.start..self.end]
    }

    #[inline]
    pub fn get_u8(&self, offset: usize) -> u8 {
        self.as_bytes()[offset]
    }

    #[inline]
    pub fn get_i64(&self, offset: usize) -> i64 {
        self.get::<i64>(offset)
    }

    #[inline]
    pub fn get_f64(&self, offset: usize) -> f64 {
        self.get::<f64>(offset)
    }

    /// Read a little-endian primitive at given offset.
    #[inline]
    pub fn get<T: ByteRepr>(&self, offset: usize) -> T {
        T::from_bytes(self.get_bytes(offset, T::N_BYTES))
    }

    /// Returns `len` bytes starting at `offset`.
    /// Panics if the range exceeds the slice.
    #[inline]
    pub fn get_bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.as_bytes()[offset..offset + len]
    }

    /// Returns a sub-slice sharing the same buffer.
    /// Panics if the range exceeds the slice.
    #[inline]
    pub fn slice(&self, offset: usize, len: usize) -> Slice {
        assert!(
            offset.checked_add(len).map_or(false, |end| end <= self.len()),
            "slice range [{}, {}+{}) exceeds length {}",
            offset,
            offset,
            len,
            self.len()
        );
        Slice {
            ptr: Arc::clone(&self.ptr),
            start: self.start + offset,
            end: self.start + offset + len,
        }
    }

    /// Returns true if both slices refer to the same buffer,
    /// regardless of their windows.
    #[inline]
    pub fn shares_buffer(&self, other: &Slice) -> bool {
        Arc::ptr_eq(&self.ptr, &other.ptr)
    }
}

impl From<Vec<u8>> for Slice {
    #[inline]
    fn from(src: Vec<u8>) -> Self {
        Slice::new(Arc::from(src))
    }
}

impl PartialEq for Slice {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Slice {}

impl fmt::Debug for Slice {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slice")
            .field("start", &self.start)
            .field("len", &self.len())
            .finish()
    }
}
