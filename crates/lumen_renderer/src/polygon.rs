//! Convex polygon primitive.

use crate::geometry::{GeometryError, Shape, ShapeKind};
use crate::Plane;
use lumen_math::{align_zero, is_zero, BoundingBox, DVec3, MathError, Ray};

/// A flat convex polygon with vertices ordered along its edge path.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    plane: Plane,
}

impl Polygon {
    /// Create a polygon, validating that it is planar and convex.
    ///
    /// Fails on fewer than 3 vertices, consecutive duplicate vertices,
    /// three consecutive collinear vertices, vertices off the plane of the
    /// first three, or an ordering that is not a convex edge path.
    pub fn new(vertices: Vec<DVec3>) -> Result<Self, GeometryError> {
        let size = vertices.len();
        if size < 3 {
            return Err(GeometryError::TooFewVertices(size));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if size == 3 {
            return Ok(Self { vertices, plane });
        }

        let n = plane.plane_normal();
        let mut edge1 = vertices[size - 1] - vertices[size - 2];
        let mut edge2 = vertices[0] - vertices[size - 1];
        let orientation = edge_turn(edge1, edge2, n)?;

        for i in 1..size {
            if !is_zero((vertices[i] - vertices[0]).dot(n)) {
                return Err(GeometryError::NotCoplanar);
            }
            edge1 = edge2;
            edge2 = vertices[i] - vertices[i - 1];
            if edge_turn(edge1, edge2, n)? != orientation {
                return Err(GeometryError::NotConvex);
            }
        }

        Ok(Self { vertices, plane })
    }

    /// Create a triangle.
    pub fn triangle(a: DVec3, b: DVec3, c: DVec3) -> Result<Self, GeometryError> {
        Self::new(vec![a, b, c])
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }
}

/// Whether the turn from `edge1` to `edge2` is counter-clockwise around `n`.
fn edge_turn(edge1: DVec3, edge2: DVec3, n: DVec3) -> Result<bool, GeometryError> {
    if is_zero(edge1.length_squared()) || is_zero(edge2.length_squared()) {
        return Err(MathError::ZeroVector.into());
    }
    let turn = edge1.cross(edge2);
    if is_zero(turn.length_squared()) {
        return Err(GeometryError::NotConvex);
    }
    Ok(turn.dot(n) > 0.0)
}

impl Shape for Polygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn normal(&self, _point: DVec3) -> Result<DVec3, GeometryError> {
        Ok(self.plane.plane_normal())
    }

    fn intersect(&self, ray: &Ray) -> Vec<DVec3> {
        let Some(&p) = self.plane.intersect(ray).first() else {
            return Vec::new();
        };

        let n = self.plane.plane_normal();
        let mut prev = self.vertices[self.vertices.len() - 1];
        let mut side = 0.0;
        for &vertex in &self.vertices {
            // Zero on an edge line or a vertex: boundary points do not count
            let s = align_zero((vertex - prev).cross(prev - p).dot(n));
            if s == 0.0 || s * side < 0.0 {
                return Vec::new();
            }
            side = s;
            prev = vertex;
        }

        vec![p]
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }
}
