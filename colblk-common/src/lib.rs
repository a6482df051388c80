pub mod byte_repr;
pub mod error;
pub mod slice;
