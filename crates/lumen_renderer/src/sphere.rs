//! Sphere primitive.

use crate::geometry::{GeometryError, Shape, ShapeKind};
use lumen_math::{align_zero, normalize, BoundingBox, DVec3, Ray, EPSILON};

/// A sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere; the radius must be positive.
    pub fn new(center: DVec3, radius: f64) -> Result<Self, GeometryError> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Sphere {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    /// Undefined at the exact center.
    fn normal(&self, point: DVec3) -> Result<DVec3, GeometryError> {
        Ok(normalize(point - self.center)?)
    }

    fn intersect(&self, ray: &Ray) -> Vec<DVec3> {
        let origin = ray.origin();

        // Starting at the center: the ray leaves through exactly one point
        if origin.abs_diff_eq(self.center, EPSILON) {
            return vec![ray.at(self.radius)];
        }

        let u = self.center - origin;
        let tm = align_zero(ray.direction().dot(u));
        let d_squared = u.length_squared() - tm * tm;
        let th_squared = align_zero(self.radius * self.radius - d_squared);
        if th_squared < 0.0 {
            return Vec::new();
        }

        // Tangent line: a single touching point
        if th_squared == 0.0 {
            return if tm > 0.0 { vec![ray.at(tm)] } else { Vec::new() };
        }

        let th = th_squared.sqrt();
        let t2 = align_zero(tm + th);
        if t2 <= 0.0 {
            return Vec::new();
        }

        let t1 = align_zero(tm - th);
        if t1 <= 0.0 {
            vec![ray.at(t2)]
        } else {
            vec![ray.at(t1), ray.at(t2)]
        }
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        let r = DVec3::splat(self.radius);
        Some(BoundingBox::new(self.center - r, self.center + r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at_x() -> Sphere {
        Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap()
    }

    #[test]
    fn test_invalid_radius() {
        assert_eq!(
            Sphere::new(DVec3::ZERO, 0.0),
            Err(GeometryError::InvalidRadius(0.0))
        );
        assert!(Sphere::new(DVec3::ZERO, -2.0).is_err());
    }

    #[test]
    fn test_normal() {
        let sphere = unit_sphere_at_x();
        assert_eq!(sphere.normal(DVec3::new(1.0, 0.0, 1.0)).unwrap(), DVec3::Z);
        assert!(sphere.normal(DVec3::new(1.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_line_misses() {
        let ray = Ray::new(DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(unit_sphere_at_x().intersect(&ray).is_empty());
    }

    #[test]
    fn test_line_crosses_twice() {
        let ray = Ray::new(DVec3::new(-1.0, 0.0, 0.0), DVec3::new(3.0, 1.0, 0.0)).unwrap();
        let mut points = unit_sphere_at_x().intersect(&ray);
        assert_eq!(points.len(), 2);

        points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        assert!(points[0].abs_diff_eq(DVec3::new(0.0651530771650466, 0.355051025721682, 0.0), 1e-9));
        assert!(points[1].abs_diff_eq(DVec3::new(1.53484692283495, 0.844948974278318, 0.0), 1e-9));
    }

    #[test]
    fn test_ray_starts_inside() {
        let ray = Ray::new(DVec3::new(0.5, 0.5, 0.0), DVec3::new(3.0, 1.0, 0.0)).unwrap();
        let points = unit_sphere_at_x().intersect(&ray);
        assert_eq!(points.len(), 1);
        assert!(((points[0] - DVec3::new(1.0, 0.0, 0.0)).length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_starts_at_center() {
        let ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::Y).unwrap();
        assert_eq!(unit_sphere_at_x().intersect(&ray), vec![DVec3::new(1.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_ray_starts_after_sphere() {
        let ray = Ray::new(DVec3::new(2.0, 1.0, 0.0), DVec3::new(3.0, 1.0, 0.0)).unwrap();
        assert!(unit_sphere_at_x().intersect(&ray).is_empty());
    }

    #[test]
    fn test_ray_starts_on_surface() {
        // Going inwards: one exit point
        let ray = Ray::new(DVec3::ZERO, DVec3::X).unwrap();
        let points = unit_sphere_at_x().intersect(&ray);
        assert_eq!(points.len(), 1);
        assert!(points[0].abs_diff_eq(DVec3::new(2.0, 0.0, 0.0), 1e-9));

        // Going outwards: nothing
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_X).unwrap();
        assert!(unit_sphere_at_x().intersect(&ray).is_empty());
    }

    #[test]
    fn test_tangent_ray() {
        let ray = Ray::new(DVec3::new(0.0, 1.0, -2.0), DVec3::Z).unwrap();
        let sphere = Sphere::new(DVec3::ZERO, 1.0).unwrap();
        let points = sphere.intersect(&ray);
        assert_eq!(points.len(), 1);
        assert!(points[0].abs_diff_eq(DVec3::new(0.0, 1.0, 0.0), 1e-9));
    }

    #[test]
    fn test_bounding_box() {
        let bbox = unit_sphere_at_x().bounding_box().unwrap();
        assert_eq!(bbox.min, DVec3::new(0.0, -1.0, -1.0));
        assert_eq!(bbox.max, DVec3::new(2.0, 1.0, 1.0));
    }
}
