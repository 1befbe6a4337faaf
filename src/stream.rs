use std::io::{self, Read, Write};

use num_bigint::BigUint;
use tracing::trace;

use crate::decode::decode;
use crate::encode::{encode_to_vec, encode_u64_unchecked};
use crate::error::DecodeError;
use crate::tables::CONTINUE_BIT;
use crate::value::Decoded;

/// Upper bound on the encoded length of any u64 (ceil(64 / 7)).
pub const MAX_U64_ENCODED_LEN: usize = 10;

/// Encode an arbitrary-precision value to a writer, returning bytes written
pub fn encode_to_writer<W: Write>(value: &BigUint, writer: &mut W) -> io::Result<usize> {
    let buf = encode_to_vec(value);
    writer.write_all(&buf)?;
    trace!(bytes = buf.len(), "wrote uleb128 value");
    Ok(buf.len())
}

/// Encode a u64 to a writer, returning bytes written
pub fn encode_u64_to_writer<W: Write>(value: u64, writer: &mut W) -> io::Result<usize> {
    let mut buf = [0u8; MAX_U64_ENCODED_LEN];
    let n = encode_u64_unchecked(value, &mut buf);
    writer.write_all(&buf[..n])?;
    trace!(bytes = n, "wrote uleb128 u64");
    Ok(n)
}

/// Decode one value from a reader, a byte at a time.
///
/// Ending before the terminator byte surfaces as `UnexpectedEof` with
/// [`DecodeError::Unterminated`] as its source.
pub fn decode_from_reader<R: Read>(reader: &mut R) -> io::Result<Decoded> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                DecodeError::Unterminated,
            ));
        }
        bytes.push(byte[0]);
        if byte[0] & CONTINUE_BIT == 0 {
            break;
        }
    }
    trace!(bytes = bytes.len(), "read uleb128 value");
    decode(&bytes).map_err(|e| io::Error::new(io::ErrorKind::UnexpectedEof, e))
}
