use std::array::TryFromSliceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("position {position} out of range, position count is {count}")]
    IndexOutOfRange { position: usize, count: usize },
    #[error("region [{offset}, {offset}+{length}) out of bounds, position count is {count}")]
    OutOfBounds {
        offset: usize,
        length: usize,
        count: usize,
    },
    #[error("Invalid format")]
    InvalidFormat,
}

impl From<TryFromSliceError> for Error {
    #[inline]
    fn from(_src: TryFromSliceError) -> Error {
        Error::InvalidFormat
    }
}

/// Fail fast on an unreadable position.
/// Callers must never rely on catching this panic.
#[cold]
#[inline(never)]
pub fn position_out_of_range(position: usize, count: usize) -> ! {
    panic!("{}", Error::IndexOutOfRange { position, count })
}
