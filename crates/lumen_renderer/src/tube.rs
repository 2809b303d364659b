//! Tube (infinite cylinder) and finite cylinder primitives.

use crate::geometry::{GeometryError, Shape, ShapeKind};
use lumen_math::{align_zero, is_zero, normalize, BoundingBox, DVec3, MathError, Ray};

/// An infinite tube of constant radius around an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    /// Create a tube; the radius must be positive.
    pub fn new(axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { axis, radius })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed distance of `point`'s projection along the axis.
    fn axis_distance(&self, point: DVec3) -> f64 {
        align_zero((point - self.axis.origin()).dot(self.axis.direction()))
    }

    /// Positive ray distances at which the ray crosses the tube's side.
    fn side_distances(&self, ray: &Ray) -> Vec<f64> {
        let va = self.axis.direction();
        let d = ray.direction();
        let dp = ray.origin() - self.axis.origin();

        // Components orthogonal to the axis
        let d_perp = d - va * d.dot(va);
        let dp_perp = dp - va * dp.dot(va);

        let a = d_perp.length_squared();
        // Parallel to the axis: never crosses the side
        if is_zero(a) {
            return Vec::new();
        }
        let b = 2.0 * d_perp.dot(dp_perp);
        let c = dp_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant < 0.0 {
            return Vec::new();
        }

        let sqrtd = discriminant.sqrt();
        let t1 = align_zero((-b - sqrtd) / (2.0 * a));
        let t2 = align_zero((-b + sqrtd) / (2.0 * a));

        let mut distances = Vec::with_capacity(2);
        if t1 > 0.0 {
            distances.push(t1);
        }
        if t2 > 0.0 && discriminant > 0.0 {
            distances.push(t2);
        }
        distances
    }
}

impl Shape for Tube {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Tube
    }

    /// Undefined for points on the axis.
    fn normal(&self, point: DVec3) -> Result<DVec3, GeometryError> {
        let o = self.axis.at(self.axis_distance(point));
        normalize(point - o).map_err(|_: MathError| GeometryError::PointOnAxis)
    }

    fn intersect(&self, ray: &Ray) -> Vec<DVec3> {
        self.side_distances(ray)
            .into_iter()
            .map(|t| ray.at(t))
            .collect()
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        None
    }
}

/// A tube cut to `height` along its axis and closed by two caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    /// Create a cylinder whose base is centered on the axis origin.
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, GeometryError> {
        if height <= 0.0 || !height.is_finite() {
            return Err(GeometryError::InvalidHeight(height));
        }
        Ok(Self {
            tube: Tube::new(axis, radius)?,
            height,
        })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    fn cap_centers(&self) -> [DVec3; 2] {
        let axis = self.tube.axis();
        [axis.origin(), axis.at(self.height)]
    }

    /// Intersect the ray with the disc of radius `radius` around `center`.
    fn cap_intersection(&self, ray: &Ray, center: DVec3) -> Option<DVec3> {
        let va = self.tube.axis().direction();
        let nv = align_zero(va.dot(ray.direction()));
        if nv == 0.0 {
            return None;
        }
        let t = align_zero(va.dot(center - ray.origin()) / nv);
        if t <= 0.0 {
            return None;
        }
        let p = ray.at(t);
        let r = self.tube.radius();
        (align_zero(p.distance_squared(center) - r * r) < 0.0).then_some(p)
    }
}

impl Shape for Cylinder {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cylinder
    }

    /// Caps (their rims included) share the axis direction as normal.
    fn normal(&self, point: DVec3) -> Result<DVec3, GeometryError> {
        let t = self.tube.axis_distance(point);
        if is_zero(t) || is_zero(t - self.height) {
            return Ok(self.tube.axis().direction());
        }
        self.tube.normal(point)
    }

    fn intersect(&self, ray: &Ray) -> Vec<DVec3> {
        let mut points: Vec<DVec3> = self
            .tube
            .side_distances(ray)
            .into_iter()
            .map(|t| ray.at(t))
            .filter(|p| {
                let t = self.tube.axis_distance(*p);
                t > 0.0 && align_zero(t - self.height) < 0.0
            })
            .collect();

        for center in self.cap_centers() {
            points.extend(self.cap_intersection(ray, center));
        }

        let origin = ray.origin();
        points.sort_by(|a, b| {
            a.distance_squared(origin)
                .partial_cmp(&b.distance_squared(origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        points
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        let va = self.tube.axis().direction();
        // Extent of a disc orthogonal to `va` along each world axis
        let e = (DVec3::ONE - va * va).max(DVec3::ZERO);
        let extent = DVec3::new(e.x.sqrt(), e.y.sqrt(), e.z.sqrt()) * self.tube.radius();
        let [bottom, top] = self.cap_centers();
        Some(BoundingBox::new(
            bottom.min(top) - extent,
            bottom.max(top) + extent,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_tube() -> Tube {
        Tube::new(Ray::new(DVec3::ONE, DVec3::Z).unwrap(), 2.0).unwrap()
    }

    fn y_cylinder() -> Cylinder {
        Cylinder::new(Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::Y).unwrap(), 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_tube_normal() {
        let tube = z_tube();
        assert_eq!(tube.normal(DVec3::new(1.0, 3.0, 3.0)).unwrap(), DVec3::Y);
        assert_eq!(tube.normal(DVec3::ONE), Err(GeometryError::PointOnAxis));
        assert_eq!(
            tube.normal(DVec3::new(1.0, 1.0, 5.0)),
            Err(GeometryError::PointOnAxis)
        );
    }

    #[test]
    fn test_tube_intersections() {
        let tube = Tube::new(Ray::new(DVec3::ZERO, DVec3::Z).unwrap(), 1.0).unwrap();

        // Crossing through the axis
        let ray = Ray::new(DVec3::new(-3.0, 0.0, 5.0), DVec3::X).unwrap();
        let points = tube.intersect(&ray);
        assert_eq!(points.len(), 2);
        assert!(points[0].abs_diff_eq(DVec3::new(-1.0, 0.0, 5.0), 1e-9));
        assert!(points[1].abs_diff_eq(DVec3::new(1.0, 0.0, 5.0), 1e-9));

        // Starting inside
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Y).unwrap();
        let points = tube.intersect(&ray);
        assert_eq!(points.len(), 1);
        assert!(points[0].abs_diff_eq(DVec3::new(0.0, 1.0, 5.0), 1e-9));

        // Parallel to the axis
        let ray = Ray::new(DVec3::new(0.5, 0.0, 0.0), DVec3::Z).unwrap();
        assert!(tube.intersect(&ray).is_empty());

        // Missing
        let ray = Ray::new(DVec3::new(-3.0, 2.0, 0.0), DVec3::X).unwrap();
        assert!(tube.intersect(&ray).is_empty());

        // Pointing away
        let ray = Ray::new(DVec3::new(3.0, 0.0, 0.0), DVec3::X).unwrap();
        assert!(tube.intersect(&ray).is_empty());
    }

    #[test]
    fn test_cylinder_normal() {
        let cylinder = y_cylinder();

        // Side
        assert_eq!(cylinder.normal(DVec3::new(0.0, 0.5, 2.0)).unwrap(), DVec3::Z);
        // Bases
        assert_eq!(cylinder.normal(DVec3::new(0.0, 0.0, 1.5)).unwrap(), DVec3::Y);
        assert_eq!(cylinder.normal(DVec3::new(0.0, 1.0, 0.5)).unwrap(), DVec3::Y);
        // Base centers
        assert_eq!(cylinder.normal(DVec3::new(0.0, 0.0, 1.0)).unwrap(), DVec3::Y);
        assert_eq!(cylinder.normal(DVec3::new(0.0, 1.0, 1.0)).unwrap(), DVec3::Y);
    }

    #[test]
    fn test_cylinder_invalid() {
        let axis = Ray::new(DVec3::ZERO, DVec3::Y).unwrap();
        assert_eq!(
            Cylinder::new(axis, 1.0, 0.0),
            Err(GeometryError::InvalidHeight(0.0))
        );
        assert_eq!(
            Cylinder::new(axis, -1.0, 1.0),
            Err(GeometryError::InvalidRadius(-1.0))
        );
    }

    #[test]
    fn test_cylinder_intersections() {
        let cylinder = Cylinder::new(Ray::new(DVec3::ZERO, DVec3::Y).unwrap(), 1.0, 2.0).unwrap();

        // Through both caps along the axis
        let ray = Ray::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y).unwrap();
        let points = cylinder.intersect(&ray);
        assert_eq!(points.len(), 2);
        assert!(points[0].abs_diff_eq(DVec3::ZERO, 1e-9));
        assert!(points[1].abs_diff_eq(DVec3::new(0.0, 2.0, 0.0), 1e-9));

        // Through the side twice
        let ray = Ray::new(DVec3::new(-3.0, 1.0, 0.0), DVec3::X).unwrap();
        let points = cylinder.intersect(&ray);
        assert_eq!(points.len(), 2);
        assert!(points[0].abs_diff_eq(DVec3::new(-1.0, 1.0, 0.0), 1e-9));

        // In through the side, out through the top cap
        let ray = Ray::new(DVec3::new(-2.0, 0.5, 0.0), DVec3::new(1.0, 1.0, 0.0)).unwrap();
        let points = cylinder.intersect(&ray);
        assert_eq!(points.len(), 2);
        assert!(points[0].abs_diff_eq(DVec3::new(-1.0, 1.5, 0.0), 1e-9));
        assert!(points[1].abs_diff_eq(DVec3::new(-0.5, 2.0, 0.0), 1e-9));

        // Passing above the cylinder
        let ray = Ray::new(DVec3::new(-3.0, 3.0, 0.0), DVec3::X).unwrap();
        assert!(cylinder.intersect(&ray).is_empty());
    }

    #[test]
    fn test_cylinder_bounding_box() {
        let bbox = y_cylinder().bounding_box().unwrap();
        assert!(bbox.min.abs_diff_eq(DVec3::new(-1.0, 0.0, 0.0), 1e-12));
        assert!(bbox.max.abs_diff_eq(DVec3::new(1.0, 1.0, 2.0), 1e-12));
        assert!(z_tube().bounding_box().is_none());
    }
}
