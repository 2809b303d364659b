//! Geometry trait and GeoPoint for ray-object intersection.

use std::fmt;

use lumen_core::{Color, Material};
use lumen_math::{BoundingBox, DVec3, MathError, Ray, EPSILON};
use thiserror::Error;

/// Errors raised while building or querying geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("height must be positive, got {0}")]
    InvalidHeight(f64),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon vertices do not lie in one plane")]
    NotCoplanar,

    #[error("polygon vertices are not ordered into a convex polygon")]
    NotConvex,

    #[error("point lies on the axis; the normal is undefined")]
    PointOnAxis,
}

/// The concrete kind of a shape, used to compare intersection records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Plane,
    Polygon,
    Tube,
    Cylinder,
}

/// A surface that rays can intersect.
///
/// `intersect` returns every point where the ray crosses the surface at a
/// strictly positive distance from the ray origin.
pub trait Shape: fmt::Debug + Send + Sync {
    fn kind(&self) -> ShapeKind;

    /// Outward unit normal at a point on the surface.
    fn normal(&self, point: DVec3) -> Result<DVec3, GeometryError>;

    fn intersect(&self, ray: &Ray) -> Vec<DVec3>;

    /// Finite extent of the shape, `None` for unbounded shapes.
    fn bounding_box(&self) -> Option<BoundingBox>;
}

/// A shape together with its surface properties.
#[derive(Debug)]
pub struct Geometry {
    shape: Box<dyn Shape>,
    material: Material,
    emission: Color,
}

impl Geometry {
    /// Create a black, non-reflective geometry around a shape.
    pub fn new(shape: impl Shape + 'static) -> Self {
        Self {
            shape: Box::new(shape),
            material: Material::default(),
            emission: Color::ZERO,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn normal(&self, point: DVec3) -> Result<DVec3, GeometryError> {
        self.shape.normal(point)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.shape.bounding_box()
    }

    /// Intersect the ray with this geometry, tagging every hit point.
    pub fn find_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        self.shape
            .intersect(ray)
            .into_iter()
            .map(|point| GeoPoint::new(self, point))
            .collect()
    }
}

/// An intersection point tagged with the geometry it lies on.
#[derive(Debug, Clone, Copy)]
pub struct GeoPoint<'a> {
    geometry: &'a Geometry,
    point: DVec3,
}

impl<'a> GeoPoint<'a> {
    pub(crate) fn new(geometry: &'a Geometry, point: DVec3) -> Self {
        Self { geometry, point }
    }

    pub fn geometry(&self) -> &'a Geometry {
        self.geometry
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }
}

impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.geometry.kind() == other.geometry.kind()
            && self.point.abs_diff_eq(other.point, EPSILON)
    }
}

/// Find the hit nearest to the ray origin.
pub fn find_closest<'a>(ray: &Ray, hits: &[GeoPoint<'a>]) -> Option<GeoPoint<'a>> {
    let origin = ray.origin();
    hits.iter().copied().min_by(|a, b| {
        let da = a.point.distance_squared(origin);
        let db = b.point.distance_squared(origin);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Plane, Sphere};

    #[test]
    fn test_geometry_defaults() {
        let geometry = Geometry::new(Sphere::new(DVec3::ZERO, 1.0).unwrap());
        assert_eq!(geometry.kind(), ShapeKind::Sphere);
        assert_eq!(geometry.emission(), Color::ZERO);
        assert_eq!(*geometry.material(), Material::default());
        assert!(geometry.bounding_box().is_some());
    }

    #[test]
    fn test_geo_point_equality() {
        let sphere = Geometry::new(Sphere::new(DVec3::ZERO, 1.0).unwrap());
        let other = Geometry::new(Sphere::new(DVec3::new(5.0, 0.0, 0.0), 1.0).unwrap());
        let plane = Geometry::new(Plane::new(DVec3::ZERO, DVec3::Z).unwrap());

        let a = GeoPoint::new(&sphere, DVec3::X);
        // Same kind and point: equal even on a different instance
        assert_eq!(a, GeoPoint::new(&other, DVec3::X));
        // Different kind
        assert_ne!(a, GeoPoint::new(&plane, DVec3::X));
        // Different point
        assert_ne!(a, GeoPoint::new(&sphere, DVec3::Y));
    }

    #[test]
    fn test_find_closest() {
        let sphere = Geometry::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0).unwrap());
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z).unwrap();

        let hits = sphere.find_intersections(&ray);
        assert_eq!(hits.len(), 2);

        let closest = find_closest(&ray, &hits).unwrap();
        assert!(closest.point().abs_diff_eq(DVec3::new(0.0, 0.0, -4.0), 1e-9));
        assert!(find_closest(&ray, &[]).is_none());
    }
}
