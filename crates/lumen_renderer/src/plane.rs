//! Infinite plane primitive.

use crate::geometry::{GeometryError, Shape, ShapeKind};
use lumen_math::{align_zero, is_zero, normalize, BoundingBox, DVec3, Ray};

/// An unbounded plane through a point with a fixed unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: DVec3,
    normal: DVec3,
}

impl Plane {
    /// Create a plane from a point and a (not necessarily unit) normal.
    pub fn new(point: DVec3, normal: DVec3) -> Result<Self, GeometryError> {
        Ok(Self {
            point,
            normal: normalize(normal)?,
        })
    }

    /// Create the plane through three points.
    ///
    /// Fails if two points coincide or all three are collinear.
    pub fn from_points(p1: DVec3, p2: DVec3, p3: DVec3) -> Result<Self, GeometryError> {
        let normal = normalize((p2 - p1).cross(p3 - p1))?;
        Ok(Self { point: p1, normal })
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    /// The plane's unit normal, independent of any surface point.
    pub fn plane_normal(&self) -> DVec3 {
        self.normal
    }
}

impl Shape for Plane {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Plane
    }

    fn normal(&self, _point: DVec3) -> Result<DVec3, GeometryError> {
        Ok(self.normal)
    }

    fn intersect(&self, ray: &Ray) -> Vec<DVec3> {
        let nv = align_zero(self.normal.dot(ray.direction()));
        // Parallel to the plane
        if nv == 0.0 {
            return Vec::new();
        }

        let to_plane = self.point - ray.origin();
        if is_zero(to_plane.length_squared()) {
            return Vec::new();
        }

        let t = align_zero(self.normal.dot(to_plane) / nv);
        if t <= 0.0 {
            Vec::new()
        } else {
            vec![ray.at(t)]
        }
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::MathError;

    fn floor() -> Plane {
        Plane::new(DVec3::ZERO, DVec3::Y).unwrap()
    }

    #[test]
    fn test_from_points() {
        let plane = Plane::from_points(DVec3::X, DVec3::Y, DVec3::Z).unwrap();
        let expected = DVec3::ONE.normalize();
        // Either orientation is a valid normal
        assert!(plane.plane_normal().abs_diff_eq(expected, 1e-12)
            || plane.plane_normal().abs_diff_eq(-expected, 1e-12));
        assert_eq!(plane.normal(DVec3::new(5.0, 6.0, 7.0)).unwrap(), plane.plane_normal());
    }

    #[test]
    fn test_from_degenerate_points() {
        // Coincident
        assert_eq!(
            Plane::from_points(DVec3::X, DVec3::X, DVec3::Z),
            Err(GeometryError::Math(MathError::ZeroVector))
        );
        // Collinear
        assert!(Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::X * 2.0).is_err());
    }

    #[test]
    fn test_intersect() {
        let ray = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::new(1.0, -1.0, 0.0)).unwrap();
        let points = floor().intersect(&ray);
        assert_eq!(points.len(), 1);
        assert!(points[0].abs_diff_eq(DVec3::new(2.0, 0.0, 0.0), 1e-9));
    }

    #[test]
    fn test_ray_moving_away() {
        let ray = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::Y).unwrap();
        assert!(floor().intersect(&ray).is_empty());
    }

    #[test]
    fn test_parallel_ray() {
        // Above the plane
        let ray = Ray::new(DVec3::new(0.0, 1.0, 0.0), DVec3::X).unwrap();
        assert!(floor().intersect(&ray).is_empty());

        // Inside the plane
        let ray = Ray::new(DVec3::new(0.0, 0.0, 3.0), DVec3::X).unwrap();
        assert!(floor().intersect(&ray).is_empty());
    }

    #[test]
    fn test_ray_starts_on_plane() {
        let ray = Ray::new(DVec3::new(1.0, 0.0, 1.0), DVec3::NEG_Y).unwrap();
        assert!(floor().intersect(&ray).is_empty());

        // At the plane's reference point
        let ray = Ray::new(DVec3::ZERO, DVec3::new(1.0, -1.0, 0.0)).unwrap();
        assert!(floor().intersect(&ray).is_empty());
    }

    #[test]
    fn test_unbounded() {
        assert!(floor().bounding_box().is_none());
    }
}
