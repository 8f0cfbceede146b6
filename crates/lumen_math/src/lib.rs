// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod ray;
pub use ray::{Ray, DELTA};

/// Values closer to zero than this are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snap `x` to exactly zero when it is within [`EPSILON`] of zero.
///
/// Sign tests on dot products go through this so that rounding noise
/// does not flip a tangent case to one side or the other.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-12));
        assert!(is_zero(-1e-12));
        assert!(!is_zero(1e-6));
    }

    #[test]
    fn test_align_zero() {
        assert_eq!(align_zero(1e-12), 0.0);
        assert_eq!(align_zero(-1e-12), 0.0);
        assert_eq!(align_zero(0.5), 0.5);
        assert_eq!(align_zero(-0.5), -0.5);
    }
}
