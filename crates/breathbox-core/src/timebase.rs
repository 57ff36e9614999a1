//! Wall-clock delta helpers.
//!
//! All session arithmetic is driven by deltas between caller-supplied
//! microsecond timestamps. A timestamp earlier than the previous one is a
//! clock anomaly and yields a zero delta; session time never moves backward.

/// Compute time delta in microseconds with saturating subtraction.
#[inline]
pub fn dt_us(now_us: i64, last_us: i64) -> u64 {
    if now_us >= last_us {
        (now_us - last_us) as u64
    } else {
        // Clock went backwards - return 0 instead of wrapping
        0
    }
}

/// Compute time delta in seconds. Convenience wrapper around `dt_us`.
#[inline]
pub fn dt_sec(now_us: i64, last_us: i64) -> f32 {
    (dt_us(now_us, last_us) as f32) / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_delta() {
        assert_eq!(dt_us(2_000_000, 500_000), 1_500_000);
        assert_eq!(dt_sec(2_000_000, 500_000), 1.5);
    }

    #[test]
    fn zero_delta() {
        assert_eq!(dt_us(1_000, 1_000), 0);
        assert_eq!(dt_sec(1_000, 1_000), 0.0);
    }

    #[test]
    fn backward_delta_clamps_to_zero() {
        assert_eq!(dt_us(1_000, 5_000), 0);
        assert_eq!(dt_sec(-5_000_000, 0), 0.0);
    }
}
