//! Small numeric helpers shared by the recursive filters.

/// Threshold below which recursive state is treated as silence.
pub const DENORMAL_THRESHOLD: f64 = 1e-30;

/// Flush tiny and non-finite values to zero.
///
/// Allpass state decays geometrically during silence and would otherwise
/// walk into the subnormal range, where arithmetic is dramatically slower
/// on most CPUs. A NaN or infinity stored as state would never decay, so
/// it is dropped as well.
#[inline]
pub fn flush_denormal(x: f64) -> f64 {
    if !x.is_finite() || libm::fabs(x) < DENORMAL_THRESHOLD {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.25), -0.25);
        assert_eq!(flush_denormal(1e-20), 1e-20);

        assert_eq!(flush_denormal(1e-31), 0.0);
        assert_eq!(flush_denormal(-1e-31), 0.0);
        assert_eq!(flush_denormal(f64::MIN_POSITIVE / 2.0), 0.0);
        assert_eq!(flush_denormal(0.0), 0.0);
    }

    #[test]
    fn test_flush_denormal_drops_non_finite() {
        assert_eq!(flush_denormal(f64::NAN), 0.0);
        assert_eq!(flush_denormal(f64::INFINITY), 0.0);
        assert_eq!(flush_denormal(f64::NEG_INFINITY), 0.0);
        assert_eq!(flush_denormal(f64::MAX), f64::MAX);
    }
}
