//! Recursive Phong/Whitted shading.
//!
//! Implements:
//! - Local Phong illumination (emission, diffuse, specular) per light
//! - Shadows attenuated by the transparency of occluders, optionally
//!   averaged over a light's target area for soft edges
//! - Reflection and refraction up to a maximum recursion level, pruned
//!   once the accumulated coefficient becomes negligible

use lumen_core::{Color, LightSource};
use lumen_math::{align_zero, DVec3, MathError, Ray};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::geometry::{GeoPoint, GeometryError};
use crate::{RenderConfig, Scene};

/// Errors raised while shading a ray.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("math error: {0}")]
    Math(#[from] MathError),
}

/// Computes the color seen along a ray.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Result<Color, TraceError>;
}

/// Whitted-style ray tracer with Phong shading.
pub struct SimpleRayTracer<'a> {
    scene: &'a Scene,
    max_level: u32,
    min_k: f64,
}

impl<'a> SimpleRayTracer<'a> {
    /// Create a tracer with the default recursion limits.
    pub fn new(scene: &'a Scene) -> Self {
        Self::with_config(scene, &RenderConfig::default())
    }

    pub fn with_config(scene: &'a Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            max_level: config.max_level,
            min_k: config.min_k,
        }
    }

    /// True when every channel of `k` is below the threshold.
    fn is_negligible(&self, k: DVec3) -> bool {
        k.max_element() < self.min_k
    }

    fn find_closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'a>> {
        self.scene.geometries.find_closest_intersection(ray)
    }

    fn calc_color(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: DVec3) -> Result<Color, TraceError> {
        let n = gp.geometry().normal(gp.point())?;
        let color = self.calc_local_effects(gp, ray, n, k)?;
        if level <= 1 {
            return Ok(color);
        }
        Ok(color + self.calc_global_effects(gp, ray, n, level, k)?)
    }

    fn calc_local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, n: DVec3, k: DVec3) -> Result<Color, TraceError> {
        let geometry = gp.geometry();
        let p = gp.point();
        let v = ray.direction();
        let nv = align_zero(n.dot(v));

        let mut color = geometry.emission();
        if nv == 0.0 {
            return Ok(color);
        }

        let material = geometry.material();
        for light in &self.scene.lights {
            let l = light.direction_to(p)?;
            let nl = align_zero(n.dot(l));
            // Light and viewer on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(p, light.as_ref(), l, n)?;
            if self.is_negligible(ktr * k) {
                continue;
            }

            let diffuse = material.kd * nl.abs();
            let r = l - n * (2.0 * nl);
            let shininess = i32::try_from(material.shininess).unwrap_or(i32::MAX);
            let specular = material.ks * (-v.dot(r)).max(0.0).powi(shininess);
            color += light.intensity_at(p) * ktr * (diffuse + specular);
        }
        Ok(color)
    }

    fn calc_global_effects(
        &self,
        gp: &GeoPoint<'_>,
        ray: &Ray,
        n: DVec3,
        level: u32,
        k: DVec3,
    ) -> Result<Color, TraceError> {
        let material = gp.geometry().material();
        let p = gp.point();
        let v = ray.direction();

        let refracted = Ray::offset(p, v, n)?;
        let mut color = self.calc_global_effect(&refracted, material.kt, level, k)?;

        let nv = align_zero(n.dot(v));
        if nv != 0.0 {
            let reflected = Ray::offset(p, v - n * (2.0 * nv), n)?;
            color += self.calc_global_effect(&reflected, material.kr, level, k)?;
        }
        Ok(color)
    }

    fn calc_global_effect(&self, ray: &Ray, kx: DVec3, level: u32, k: DVec3) -> Result<Color, TraceError> {
        let kkx = k * kx;
        if self.is_negligible(kkx) {
            return Ok(Color::ZERO);
        }
        match self.find_closest_intersection(ray) {
            None => Ok(self.scene.background),
            Some(gp) => Ok(self.calc_color(&gp, ray, level - 1, kkx)? * kx),
        }
    }

    /// Fraction of the light reaching `p`, per channel.
    ///
    /// `l` points from the light towards `p`. Lights with a target area are
    /// sampled over the whole area and the results averaged.
    fn transparency(&self, p: DVec3, light: &dyn LightSource, l: DVec3, n: DVec3) -> Result<DVec3, TraceError> {
        if let Some(area) = light.target_area() {
            let mut rng = StdRng::seed_from_u64(point_seed(p));
            let samples = area.scatter_points(l, &mut rng);
            if !samples.is_empty() {
                let mut total = DVec3::ZERO;
                for &sample in &samples {
                    let shadow_ray = Ray::offset(p, sample - p, n)?;
                    total += self.transparency_along(p, &shadow_ray, p.distance(sample));
                }
                return Ok(total / samples.len() as f64);
            }
        }

        let shadow_ray = Ray::offset(p, -l, n)?;
        Ok(self.transparency_along(p, &shadow_ray, light.distance_to(p)))
    }

    /// Product of the transparencies of everything between `p` and
    /// `max_distance` along the shadow ray.
    fn transparency_along(&self, p: DVec3, shadow_ray: &Ray, max_distance: f64) -> DVec3 {
        let mut ktr = DVec3::ONE;
        for hit in self.scene.geometries.find_intersections(shadow_ray) {
            if align_zero(hit.point().distance(p) - max_distance) <= 0.0 {
                ktr *= hit.geometry().material().kt;
                if ktr == DVec3::ZERO {
                    break;
                }
            }
        }
        ktr
    }
}

impl RayTracer for SimpleRayTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> Result<Color, TraceError> {
        match self.find_closest_intersection(ray) {
            None => Ok(self.scene.background),
            Some(gp) => {
                let color = self.calc_color(&gp, ray, self.max_level, DVec3::ONE)?;
                Ok(color + self.scene.ambient_light.intensity())
            }
        }
    }
}

/// Seed for soft-shadow jitter, derived from the shading point.
///
/// Keeps the image independent of which thread shades which pixel.
fn point_seed(p: DVec3) -> u64 {
    p.x.to_bits() ^ p.y.to_bits().rotate_left(21) ^ p.z.to_bits().rotate_left(42)
}
