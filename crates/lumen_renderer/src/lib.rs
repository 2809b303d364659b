//! Lumen Renderer - recursive Phong ray tracing on the CPU.
//!
//! Traces one ray per pixel through a scene of analytic shapes, shading
//! hits with the Phong model plus recursive reflection and refraction.
//! Intersection queries can be pruned with bounding boxes or a BVH, and
//! pixels can be dispatched to a pool of worker threads.

mod bvh;
mod camera;
mod config;
mod geometries;
mod geometry;
mod pixel;
mod plane;
mod polygon;
mod renderer;
mod scene;
mod sphere;
mod tracer;
mod tube;

pub use camera::{Camera, CameraBuilder, CameraError};
pub use config::{ConfigError, RenderConfig};
pub use geometries::Geometries;
pub use geometry::{find_closest, GeoPoint, Geometry, GeometryError, Shape, ShapeKind};
pub use pixel::{Pixel, PixelCursor};
pub use plane::Plane;
pub use polygon::Polygon;
pub use renderer::{clamp_01, color_to_rgba, print_grid, render, ImageBuffer, PixelSink, RenderError};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tracer::{RayTracer, SimpleRayTracer, TraceError};
pub use tube::{Cylinder, Tube};

/// Re-export the scene description and math types used in the public API
pub use lumen_core::{Color, Material};
pub use lumen_math::{DVec3, Ray};
