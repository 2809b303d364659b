//! Lumen math - double precision vector algebra for the ray tracer.
//!
//! Points, vectors and RGB triples are all `glam::DVec3`; this crate adds
//! the tolerance helpers, rays and bounding boxes the renderer builds on.

// Re-export glam for convenience
pub use glam::*;

mod bounding_box;
mod ray;
mod util;

pub use bounding_box::BoundingBox;
pub use ray::{Ray, OFFSET_DELTA};
pub use util::{align_zero, is_zero, normalize, EPSILON};

use thiserror::Error;

/// Errors raised by vector algebra on degenerate input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroVector,
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
        assert_eq!(a.cross(b), DVec3::new(-3.0, 6.0, -3.0));
    }
}
