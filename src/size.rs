use num_bigint::BigUint;

/// Exact encoded length of a u64, without producing output
pub fn encoded_size_u64(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let mut value = value;
    let mut count = 0;
    while value != 0 {
        count += 1;
        value >>= 7;
    }
    count
}

/// Exact encoded length of an arbitrary-precision value, without producing output
pub fn encoded_size(value: &BigUint) -> usize {
    let bits = value.bits();
    if bits == 0 {
        return 1;
    }
    ((bits + 6) / 7) as usize
}
