//! Byte-level helpers: comparison, hashing, printable rendering, and the
//! big-endian writable primitives the descriptor codec is built from.

pub mod bytes;
pub mod writable;

pub use writable::{DataInput, DataOutput};
