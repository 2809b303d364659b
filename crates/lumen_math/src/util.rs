use crate::{DVec3, MathError};

/// Values closer to zero than this are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is indistinguishable from zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snap values indistinguishable from zero to exactly zero.
///
/// Every intersection routine runs its signed quantities through this before
/// comparing them, so floating error never produces a spurious root.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}

/// Normalize a vector, failing on zero length instead of producing NaN.
#[inline]
pub fn normalize(v: DVec3) -> Result<DVec3, MathError> {
    v.try_normalize().ok_or(MathError::ZeroVector)
}
