use crate::error::DecodeError;
use crate::tables::{CONTINUE_BIT, PAYLOAD_MASK};
use crate::value::{biguint_from_u32_words, biguint_from_u64_words, Decoded, Value};

/// Decode one ULEB128 value from the start of `bytes`.
///
/// Consumes bytes up to and including the first one with a clear continuation
/// flag. `Err(Unterminated)` means the input ran out first; nothing is
/// consumed and the call can simply be repeated once more bytes are
/// available.
pub fn decode(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    decode_seeded(bytes, 0, 0)
}

/// Decode with `pre_bits` (0-64) low-order bits of the result already known.
///
/// `pre_value` is masked to `pre_bits` and the payload bits of `bytes` land
/// above it, so a decode split across reads can resume without re-deriving
/// the part already seen.
pub fn decode_seeded(bytes: &[u8], pre_value: u64, pre_bits: u32) -> Result<Decoded, DecodeError> {
    let pre_bits = pre_bits.min(64);
    #[cfg(target_pointer_width = "64")]
    {
        decode_words_u64(bytes, pre_value, pre_bits)
    }
    #[cfg(not(target_pointer_width = "64"))]
    {
        decode_words_u32(bytes, pre_value, pre_bits)
    }
}

fn low_bits_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Accumulate 7-bit payload groups into 64-bit machine words, spilling a
/// completed word whenever the bit offset wraps the word width.
pub fn decode_words_u64(
    bytes: &[u8],
    pre_value: u64,
    pre_bits: u32,
) -> Result<Decoded, DecodeError> {
    let mut words: Vec<u64> = Vec::new();
    let mut accum = pre_value & low_bits_mask(pre_bits);
    let mut offset = pre_bits;
    if offset >= 64 {
        words.push(accum);
        accum = 0;
        offset -= 64;
    }

    for (i, &byte) in bytes.iter().enumerate() {
        let payload = (byte & PAYLOAD_MASK) as u64;
        accum |= payload << offset;
        offset += 7;
        if offset >= 64 {
            words.push(accum);
            offset -= 64;
            // Bits shifted off the top of the closed word restart the next one.
            accum = payload >> (7 - offset);
        }

        if byte & CONTINUE_BIT == 0 {
            let value = if words.is_empty() {
                Value::U64(accum)
            } else {
                if accum != 0 {
                    words.push(accum);
                }
                if words.len() == 1 {
                    Value::U64(words[0])
                } else {
                    Value::Big(biguint_from_u64_words(&words))
                }
            };
            return Ok(Decoded {
                value,
                bytes_read: i + 1,
            });
        }
    }

    Err(DecodeError::Unterminated)
}

/// 32-bit-word twin of `decode_words_u64`. One or two words still fit a u64.
pub fn decode_words_u32(
    bytes: &[u8],
    pre_value: u64,
    pre_bits: u32,
) -> Result<Decoded, DecodeError> {
    let mut words: Vec<u32> = Vec::new();
    let mut seed = pre_value & low_bits_mask(pre_bits);
    let mut offset = pre_bits;
    while offset >= 32 {
        words.push(seed as u32);
        seed >>= 32;
        offset -= 32;
    }
    let mut accum = seed as u32;

    for (i, &byte) in bytes.iter().enumerate() {
        let payload = (byte & PAYLOAD_MASK) as u32;
        accum |= payload << offset;
        offset += 7;
        if offset >= 32 {
            words.push(accum);
            offset -= 32;
            accum = payload >> (7 - offset);
        }

        if byte & CONTINUE_BIT == 0 {
            let value = if words.is_empty() {
                Value::U64(accum as u64)
            } else {
                if accum != 0 {
                    words.push(accum);
                }
                if words.len() == 1 {
                    Value::U64(words[0] as u64)
                } else if words.len() == 2 {
                    Value::U64(((words[1] as u64) << 32) | words[0] as u64)
                } else {
                    Value::Big(biguint_from_u32_words(words))
                }
            };
            return Ok(Decoded {
                value,
                bytes_read: i + 1,
            });
        }
    }

    Err(DecodeError::Unterminated)
}
