//! Configuration constants for pagesim.

/// Width of the Aging policy's per-frame history register.
pub const AGE_COUNTER_BITS: u32 = u8::BITS;

/// Bit set in an age counter when its frame was referenced since the last tick.
pub const AGE_MSB: u8 = 1 << (AGE_COUNTER_BITS - 1);

/// Frame count used when the caller does not pick one.
pub const DEFAULT_FRAMES: i64 = 3;

/// Accesses between two Aging ticks when the caller does not pick a schedule.
pub const DEFAULT_TICK_INTERVAL: u64 = 4;

/// The textbook reference string used to validate every policy.
///
/// With three frames: FIFO 15 faults, LRU 12, Optimal 9.
pub const CANONICAL_TRACE: [u32; 20] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_msb_is_top_bit() {
        assert_eq!(AGE_MSB, 0x80);
        assert_eq!(AGE_MSB.leading_zeros(), 0);
    }

    #[test]
    fn test_canonical_trace_shape() {
        assert_eq!(CANONICAL_TRACE.len(), 20);
        assert_eq!(CANONICAL_TRACE[0], 7);
        assert_eq!(CANONICAL_TRACE[19], 1);
    }
}
