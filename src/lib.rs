//! Unsigned little-endian base-128 (ULEB128) variable-length integers.
//!
//! Each encoded byte carries 7 payload bits (least-significant group first)
//! and a continuation flag in bit 7; the terminator byte has the flag clear.
//! Values up to `u64::MAX` take a shift-loop fast path; wider values are
//! encoded straight from a `BigUint`'s machine-word array in table-driven
//! steps, one table set per word width.

pub mod decode;
pub mod encode;
pub mod error;
pub mod size;
pub mod stream;
pub mod tables;
pub mod value;

pub use decode::{decode, decode_seeded};
pub use encode::{encode_into, encode_to_vec, encode_u64_into, encode_u64_to_vec};
pub use error::{DecodeError, EncodeError};
pub use size::{encoded_size, encoded_size_u64};
pub use stream::{decode_from_reader, encode_to_writer, encode_u64_to_writer, MAX_U64_ENCODED_LEN};
pub use value::{Decoded, Value};
