use crate::{DVec3, Ray};

/// Axis-aligned bounding box used to prune intersection tests.
///
/// Once computed `min <= max` on every axis. Geometries without a finite
/// extent simply have no box (`Option<BoundingBox>::None`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    /// Create a box from its two extreme corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Create the smallest box containing every point.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = DVec3>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |bbox, p| {
            Self::new(bbox.min.min(p), bbox.max.max(p))
        }))
    }

    /// Create a box that surrounds both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Test if the ray's line can cross this box.
    ///
    /// Uses the slab method. An axis the ray runs parallel to does not narrow
    /// the interval; the origin must already lie inside that slab.
    pub fn has_intersections(&self, ray: &Ray) -> bool {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let (o, d) = (origin[axis], direction[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d != 0.0 {
                let t1 = (lo - o) / d;
                let t2 = (hi - o) / d;
                t_min = t_min.max(t1.min(t2));
                t_max = t_max.min(t1.max(t2));
            } else if o < lo || o > hi {
                return false;
            }
        }

        t_max >= t_min
    }
}
