use num_bigint::BigUint;

/// A decoded non-negative integer: kept as a u64 whenever it fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U64(u64),
    Big(BigUint),
}

impl Value {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(v) => Some(*v),
            Value::Big(_) => None,
        }
    }

    /// Widen to a `BigUint` regardless of which form the decoder produced.
    pub fn to_biguint(&self) -> BigUint {
        match self {
            Value::U64(v) => BigUint::from(*v),
            Value::Big(v) => v.clone(),
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<BigUint> for Value {
    fn from(v: BigUint) -> Self {
        Value::Big(v)
    }
}

/// Result of a successful decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub value: Value,
    /// Bytes consumed from the input, terminator included
    pub bytes_read: usize,
}

/// Assemble a `BigUint` from little-endian 64-bit machine words.
pub(crate) fn biguint_from_u64_words(words: &[u64]) -> BigUint {
    let mut digits = Vec::with_capacity(words.len() * 2);
    for &word in words {
        digits.push(word as u32);
        digits.push((word >> 32) as u32);
    }
    BigUint::new(digits)
}

/// Assemble a `BigUint` from little-endian 32-bit machine words.
pub(crate) fn biguint_from_u32_words(words: Vec<u32>) -> BigUint {
    BigUint::new(words)
}
