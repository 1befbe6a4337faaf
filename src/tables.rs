/// Payload bits of an encoded byte.
pub const PAYLOAD_MASK: u8 = 0x7f;
/// Continuation flag: set on every encoded byte except the last.
pub const CONTINUE_BIT: u8 = 0x80;

/// Length of the bit-alignment cycle: 7-bit groups realign with half-word
/// boundaries every 14 half-word steps (two steps per machine word).
pub const CYCLE_LEN: usize = 14;

// 64-bit machine words, processed as low/high 32-bit halves. Even steps take
// the low half (shifted left over the leftover bits from the previous step),
// odd steps take the high half (shifted right down onto them). Each entry
// gives how many complete 7-bit groups can be flushed after the merge.
pub const GROUP_COUNTS_64: [u8; CYCLE_LEN] = [4, 5, 4, 5, 4, 5, 5, 4, 5, 4, 5, 4, 5, 5];
pub const LOW_SHIFTS_64: [u8; CYCLE_LEN] = [0, 0, 1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 0];
pub const HIGH_SHIFTS_64: [u8; CYCLE_LEN] = [0, 28, 0, 27, 0, 26, 0, 32, 0, 31, 0, 30, 0, 29];

// 32-bit machine words, processed as low/high 16-bit halves.
pub const GROUP_COUNTS_32: [u8; CYCLE_LEN] = [2, 2, 2, 3, 2, 2, 3, 2, 2, 2, 3, 2, 2, 3];
pub const LOW_SHIFTS_32: [u8; CYCLE_LEN] = [0, 0, 4, 0, 1, 0, 5, 0, 2, 0, 6, 0, 3, 0];
pub const HIGH_SHIFTS_32: [u8; CYCLE_LEN] = [0, 14, 0, 10, 0, 13, 0, 16, 0, 12, 0, 15, 0, 11];
