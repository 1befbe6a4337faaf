use num_bigint::BigUint;

use crate::error::EncodeError;
use crate::size::{encoded_size, encoded_size_u64};
use crate::tables::{
    CONTINUE_BIT, CYCLE_LEN, GROUP_COUNTS_32, GROUP_COUNTS_64, HIGH_SHIFTS_32, HIGH_SHIFTS_64,
    LOW_SHIFTS_32, LOW_SHIFTS_64, PAYLOAD_MASK,
};

/// Encode a u64 into `buf` starting at offset 0, returning the byte count.
/// Fails without writing anything if `buf` cannot hold the encoding.
pub fn encode_u64_into(value: u64, buf: &mut [u8]) -> Result<usize, EncodeError> {
    let needed = encoded_size_u64(value);
    if buf.len() < needed {
        return Err(EncodeError::InsufficientCapacity {
            needed,
            available: buf.len(),
        });
    }
    Ok(encode_u64_unchecked(value, buf))
}

/// Encode an arbitrary-precision value into `buf` starting at offset 0,
/// returning the byte count. The sign-free `BigUint` type is deliberate:
/// ULEB128 carries no sign. Fails without writing anything if `buf` cannot
/// hold the encoding.
pub fn encode_into(value: &BigUint, buf: &mut [u8]) -> Result<usize, EncodeError> {
    let needed = encoded_size(value);
    if buf.len() < needed {
        return Err(EncodeError::InsufficientCapacity {
            needed,
            available: buf.len(),
        });
    }
    Ok(encode_biguint_unchecked(value, buf))
}

/// Encode a u64, appending to `out` (teacher-style growable convenience).
pub fn encode_u64_to_vec(value: u64, out: &mut Vec<u8>) {
    let start = out.len();
    out.resize(start + encoded_size_u64(value), 0);
    encode_u64_unchecked(value, &mut out[start..]);
}

/// Encode an arbitrary-precision value into a freshly sized Vec.
pub fn encode_to_vec(value: &BigUint) -> Vec<u8> {
    let mut buf = vec![0u8; encoded_size(value)];
    let n = encode_biguint_unchecked(value, &mut buf);
    buf.truncate(n);
    buf
}

pub(crate) fn encode_u64_unchecked(mut value: u64, buf: &mut [u8]) -> usize {
    let mut n = 0;
    while value >= 0x80 {
        buf[n] = (value as u8) | CONTINUE_BIT;
        n += 1;
        value >>= 7;
    }
    buf[n] = value as u8;
    n + 1
}

pub(crate) fn encode_biguint_unchecked(value: &BigUint, buf: &mut [u8]) -> usize {
    if value.bits() == 0 {
        buf[0] = 0;
        return 1;
    }
    #[cfg(target_pointer_width = "64")]
    {
        encode_words_u64(&value.to_u64_digits(), buf)
    }
    #[cfg(not(target_pointer_width = "64"))]
    {
        encode_words_u32(&value.to_u32_digits(), buf)
    }
}

/// Table-driven encoding of a little-endian 64-bit word array (most
/// significant word non-zero). Each word is merged into the carry accumulator
/// as two 32-bit halves at the table-given alignment, then the table-given
/// number of complete 7-bit groups is flushed. O(word count), not O(bit
/// count). `buf` must hold the exact encoded size.
pub fn encode_words_u64(words: &[u64], buf: &mut [u8]) -> usize {
    const LOW_MASK: u64 = 0xffff_ffff;
    const HIGH_MASK: u64 = 0xffff_ffff_0000_0000;

    debug_assert!(!words.is_empty());
    debug_assert!(*words.last().unwrap() != 0);

    let mut n = 0;
    let mut accum = 0u64;
    let mut step = 0;
    let last = words.len() - 1;

    for &word in &words[..last] {
        accum |= (word & LOW_MASK) << LOW_SHIFTS_64[step];
        for _ in 0..GROUP_COUNTS_64[step] {
            buf[n] = (accum as u8 & PAYLOAD_MASK) | CONTINUE_BIT;
            n += 1;
            accum >>= 7;
        }
        step = (step + 1) % CYCLE_LEN;

        accum |= (word & HIGH_MASK) >> HIGH_SHIFTS_64[step];
        for _ in 0..GROUP_COUNTS_64[step] {
            buf[n] = (accum as u8 & PAYLOAD_MASK) | CONTINUE_BIT;
            n += 1;
            accum >>= 7;
        }
        step = (step + 1) % CYCLE_LEN;
    }

    // Last word: stop as soon as no bits remain anywhere, and leave the
    // continuation flag clear on the final byte.
    let word = words[last];
    let high = word & HIGH_MASK;

    accum |= (word & LOW_MASK) << LOW_SHIFTS_64[step];
    for _ in 0..GROUP_COUNTS_64[step] {
        buf[n] = accum as u8 & PAYLOAD_MASK;
        n += 1;
        accum >>= 7;
        if accum == 0 && high == 0 {
            return n;
        }
        buf[n - 1] |= CONTINUE_BIT;
    }
    step = (step + 1) % CYCLE_LEN;

    accum |= high >> HIGH_SHIFTS_64[step];
    loop {
        buf[n] = accum as u8 & PAYLOAD_MASK;
        n += 1;
        accum >>= 7;
        if accum == 0 {
            return n;
        }
        buf[n - 1] |= CONTINUE_BIT;
    }
}

/// 32-bit-word twin of `encode_words_u64`, merging 16-bit halves.
pub fn encode_words_u32(words: &[u32], buf: &mut [u8]) -> usize {
    const LOW_MASK: u32 = 0xffff;
    const HIGH_MASK: u32 = 0xffff_0000;

    debug_assert!(!words.is_empty());
    debug_assert!(*words.last().unwrap() != 0);

    let mut n = 0;
    let mut accum = 0u32;
    let mut step = 0;
    let last = words.len() - 1;

    for &word in &words[..last] {
        accum |= (word & LOW_MASK) << LOW_SHIFTS_32[step];
        for _ in 0..GROUP_COUNTS_32[step] {
            buf[n] = (accum as u8 & PAYLOAD_MASK) | CONTINUE_BIT;
            n += 1;
            accum >>= 7;
        }
        step = (step + 1) % CYCLE_LEN;

        accum |= (word & HIGH_MASK) >> HIGH_SHIFTS_32[step];
        for _ in 0..GROUP_COUNTS_32[step] {
            buf[n] = (accum as u8 & PAYLOAD_MASK) | CONTINUE_BIT;
            n += 1;
            accum >>= 7;
        }
        step = (step + 1) % CYCLE_LEN;
    }

    let word = words[last];
    let high = word & HIGH_MASK;

    accum |= (word & LOW_MASK) << LOW_SHIFTS_32[step];
    for _ in 0..GROUP_COUNTS_32[step] {
        buf[n] = accum as u8 & PAYLOAD_MASK;
        n += 1;
        accum >>= 7;
        if accum == 0 && high == 0 {
            return n;
        }
        buf[n - 1] |= CONTINUE_BIT;
    }
    step = (step + 1) % CYCLE_LEN;

    accum |= high >> HIGH_SHIFTS_32[step];
    loop {
        buf[n] = accum as u8 & PAYLOAD_MASK;
        n += 1;
        accum >>= 7;
        if accum == 0 {
            return n;
        }
        buf[n - 1] |= CONTINUE_BIT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::biguint_from_u64_words;
    use proptest::prelude::*;

    // Independent bit-by-bit reference: peel 7 bits at a time with big-int
    // arithmetic, no tables involved.
    fn reference_encode(value: &BigUint) -> Vec<u8> {
        let mut v = value.clone();
        let mut out = Vec::new();
        loop {
            let low = v.to_bytes_le()[0] & PAYLOAD_MASK;
            v >>= 7u32;
            if v.bits() == 0 {
                out.push(low);
                return out;
            }
            out.push(low | CONTINUE_BIT);
        }
    }

    fn encode_both_engines(value: &BigUint) -> (Vec<u8>, Vec<u8>) {
        let size = encoded_size(value);
        let mut buf64 = vec![0u8; size];
        let n64 = encode_words_u64(&value.to_u64_digits(), &mut buf64);
        buf64.truncate(n64);
        let mut buf32 = vec![0u8; size];
        let n32 = encode_words_u32(&value.to_u32_digits(), &mut buf32);
        buf32.truncate(n32);
        (buf64, buf32)
    }

    #[test]
    fn known_vectors() {
        let mut buf = [0u8; 16];

        let n = encode_u64_into(104543565, &mut buf).unwrap();
        assert_eq!(&buf[..n], [0xcd, 0xea, 0xec, 0x31]);

        let n = encode_u64_into(u64::MAX, &mut buf).unwrap();
        assert_eq!(
            &buf[..n],
            [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
        );

        // Two-word value {0, 1}, i.e. 2^64.
        let two_pow_64 = biguint_from_u64_words(&[0, 1]);
        let n = encode_into(&two_pow_64, &mut buf).unwrap();
        assert_eq!(
            &buf[..n],
            [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02]
        );
    }

    #[test]
    fn zero_encodes_as_a_single_zero_byte() {
        let mut buf = [0xaau8; 4];
        assert_eq!(encode_u64_into(0, &mut buf).unwrap(), 1);
        assert_eq!(buf[0], 0x00);

        let mut buf = [0xaau8; 4];
        assert_eq!(encode_into(&BigUint::from(0u32), &mut buf).unwrap(), 1);
        assert_eq!(buf[0], 0x00);
    }

    #[test]
    fn insufficient_capacity_leaves_buffer_untouched() {
        let mut buf = [0u8; 1];
        assert_eq!(
            encode_u64_into(128, &mut buf),
            Err(EncodeError::InsufficientCapacity {
                needed: 2,
                available: 1
            })
        );
        assert_eq!(buf[0], 0);

        let mut empty: [u8; 0] = [];
        assert!(encode_into(&BigUint::from(0u32), &mut empty).is_err());
    }

    #[test]
    fn fast_path_matches_word_path_on_shared_range() {
        for value in [
            0u64,
            1,
            127,
            128,
            0x3fff,
            0x4000,
            104543565,
            1 << 32,
            (1 << 56) - 1,
            u64::MAX,
        ] {
            let mut fast = [0u8; 10];
            let n = encode_u64_into(value, &mut fast).unwrap();
            let big = encode_to_vec(&BigUint::from(value));
            assert_eq!(&fast[..n], &big[..], "value {}", value);
        }
    }

    #[test]
    fn vec_helpers_append_and_size_exactly() {
        let mut out = vec![0x42];
        encode_u64_to_vec(300, &mut out);
        assert_eq!(out, [0x42, 0xac, 0x02]);

        let v = BigUint::from(300u32);
        assert_eq!(encode_to_vec(&v), [0xac, 0x02]);
        assert_eq!(encode_to_vec(&v).len(), encoded_size(&v));
    }

    #[test]
    fn word_boundary_spans() {
        // One, two and three 64-bit words, crossing each boundary by one bit.
        for bits in [63u32, 64, 65, 127, 128, 129, 191, 192, 193] {
            let value = BigUint::from(1u32) << bits;
            let (b64, b32) = encode_both_engines(&value);
            let expected = reference_encode(&value);
            assert_eq!(b64, expected, "2^{} via 64-bit words", bits);
            assert_eq!(b32, expected, "2^{} via 32-bit words", bits);
            assert_eq!(b64.len(), encoded_size(&value));
        }
    }

    proptest! {
        // Exhaustive-style verification of the table-driven engines against
        // the bit-by-bit reference, including word counts past a full
        // 14-step cycle (more than seven 64-bit words).
        #[test]
        fn engines_match_reference(mut words in proptest::collection::vec(any::<u64>(), 1..12)) {
            while words.last() == Some(&0) {
                words.pop();
            }
            prop_assume!(!words.is_empty());

            let value = biguint_from_u64_words(&words);
            let expected = reference_encode(&value);
            let (b64, b32) = encode_both_engines(&value);
            prop_assert_eq!(&b64, &expected);
            prop_assert_eq!(&b32, &expected);
            prop_assert_eq!(expected.len(), encoded_size(&value));
        }

        #[test]
        fn fast_path_matches_reference(value in any::<u64>()) {
            let mut buf = [0u8; 10];
            let n = encode_u64_unchecked(value, &mut buf);
            prop_assert_eq!(&buf[..n], &reference_encode(&BigUint::from(value))[..]);
            prop_assert_eq!(n, encoded_size_u64(value));
        }
    }
}
