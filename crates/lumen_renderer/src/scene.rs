//! Scene container: geometry, lights and background.

use lumen_core::{AmbientLight, Color, LightSource};

use crate::{Geometries, Geometry};

/// Everything a tracer needs to shade rays.
///
/// Read-only once rendering starts; shared by all workers.
pub struct Scene {
    /// Scene name (used for logging)
    pub name: String,
    pub geometries: Geometries,
    pub lights: Vec<Box<dyn LightSource>>,
    pub ambient_light: AmbientLight,
    /// Color of rays that hit nothing
    pub background: Color,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometries: Geometries::new(),
            lights: Vec::new(),
            ambient_light: AmbientLight::none(),
            background: Color::ZERO,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    pub fn add_geometry(&mut self, geometry: Geometry) {
        self.geometries.add(geometry);
    }

    pub fn add_light(&mut self, light: impl LightSource + 'static) {
        self.lights.push(Box::new(light));
    }

    /// Replace the geometry tree by its BVH.
    pub fn build_bvh(&mut self) {
        let geometries = std::mem::take(&mut self.geometries);
        self.geometries = geometries.make_bvh();
    }
}
