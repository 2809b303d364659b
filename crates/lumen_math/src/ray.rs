use crate::{align_zero, is_zero, normalize, DVec3, MathError};

/// Distance a secondary ray's origin is pushed off the surface it leaves.
pub const OFFSET_DELTA: f64 = 0.1;

/// A half-line with an origin point and a unit direction.
///
/// The direction is normalized once at construction; a ray is immutable
/// afterwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length.
    pub fn new(origin: DVec3, direction: DVec3) -> Result<Self, MathError> {
        Ok(Self {
            origin,
            direction: normalize(direction)?,
        })
    }

    /// Create a ray leaving a surface point.
    ///
    /// The origin is nudged by [`OFFSET_DELTA`] along `normal`, towards the
    /// side `direction` points to, so the ray does not immediately hit the
    /// surface it starts on. A direction tangent to the surface leaves the
    /// origin where it is.
    pub fn offset(point: DVec3, direction: DVec3, normal: DVec3) -> Result<Self, MathError> {
        let nd = align_zero(normal.dot(direction));
        let origin = if nd == 0.0 {
            point
        } else {
            point + normal * OFFSET_DELTA.copysign(nd)
        };
        Self::new(origin, direction)
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the ray's unit direction.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Compute a point along the ray at distance t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        if is_zero(t) {
            self.origin
        } else {
            self.origin + self.direction * t
        }
    }

    /// Find the point closest to the ray origin.
    pub fn find_closest_point(&self, points: &[DVec3]) -> Option<DVec3> {
        points.iter().copied().min_by(|a, b| {
            let da = a.distance_squared(self.origin);
            let db = b.distance_squared(self.origin);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
