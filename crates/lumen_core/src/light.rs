//! Light sources.
//!
//! Every light answers three questions about a surface point: how much
//! light reaches it, from which direction, and from how far away.

use lumen_math::{align_zero, normalize, DVec3, MathError};

use crate::{Color, TargetArea};

/// Uniform scene-wide light, added once per shaded pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// Create an ambient light scaled by a single attenuation factor.
    pub fn new(color: Color, ka: f64) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    /// Create an ambient light scaled per channel.
    pub fn new_rgb(color: Color, ka: DVec3) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    /// An ambient light contributing nothing.
    pub fn none() -> Self {
        Self {
            intensity: Color::ZERO,
        }
    }

    /// Get the ambient intensity.
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::none()
    }
}

/// Trait for lights that illuminate specific surface points.
pub trait LightSource: Send + Sync {
    /// Light intensity arriving at `point`.
    fn intensity_at(&self, point: DVec3) -> Color;

    /// Unit direction from the light towards `point`.
    ///
    /// Fails if `point` coincides with the light's position.
    fn direction_to(&self, point: DVec3) -> Result<DVec3, MathError>;

    /// Distance from `point` to the light (infinite for directional lights).
    fn distance_to(&self, point: DVec3) -> f64;

    /// Area sampled for soft shadows, if the light has one.
    fn target_area(&self) -> Option<&TargetArea> {
        None
    }
}

/// Omnidirectional light at a position, attenuated with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: DVec3,
    /// Constant attenuation
    kc: f64,
    /// Linear attenuation
    kl: f64,
    /// Quadratic attenuation
    kq: f64,
    target_area: Option<TargetArea>,
}

impl PointLight {
    /// Create an unattenuated point light.
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            target_area: None,
        }
    }

    /// Set the constant attenuation factor.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    /// Set the linear attenuation factor.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    /// Set the quadratic attenuation factor.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    /// Sample a `rib`-sized patch around the light for soft shadows.
    pub fn with_target_area(mut self, rib: f64, grid: u32) -> Self {
        self.target_area = Some(TargetArea::new(self.position, rib, grid));
        self
    }

    /// Get the light position.
    pub fn position(&self) -> DVec3 {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        let d = self.position.distance(point);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }

    fn direction_to(&self, point: DVec3) -> Result<DVec3, MathError> {
        normalize(point - self.position)
    }

    fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }

    fn target_area(&self) -> Option<&TargetArea> {
        self.target_area.as_ref()
    }
}

/// Point light narrowed to a cone around its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    light: PointLight,
    direction: DVec3,
    narrow_beam: f64,
}

impl SpotLight {
    /// Create a spot light; `direction` must not be zero.
    pub fn new(intensity: Color, position: DVec3, direction: DVec3) -> Result<Self, MathError> {
        Ok(Self {
            light: PointLight::new(intensity, position),
            direction: normalize(direction)?,
            narrow_beam: 1.0,
        })
    }

    /// Set the constant attenuation factor.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    /// Set the linear attenuation factor.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    /// Set the quadratic attenuation factor.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    /// Sample a `rib`-sized patch around the light for soft shadows.
    pub fn with_target_area(mut self, rib: f64, grid: u32) -> Self {
        self.light = self.light.with_target_area(rib, grid);
        self
    }

    /// Sharpen the beam: the cone falloff is raised to this power.
    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        let Ok(l) = self.light.direction_to(point) else {
            return Color::ZERO;
        };
        let cos = align_zero(self.direction.dot(l));
        if cos <= 0.0 {
            return Color::ZERO;
        }
        let falloff = if self.narrow_beam == 1.0 {
            cos
        } else {
            cos.powf(self.narrow_beam)
        };
        self.light.intensity_at(point) * falloff
    }

    fn direction_to(&self, point: DVec3) -> Result<DVec3, MathError> {
        self.light.direction_to(point)
    }

    fn distance_to(&self, point: DVec3) -> f64 {
        self.light.distance_to(point)
    }

    fn target_area(&self) -> Option<&TargetArea> {
        self.light.target_area()
    }
}

/// Light arriving from infinitely far away along a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: DVec3,
}

impl DirectionalLight {
    /// Create a directional light; `direction` must not be zero.
    pub fn new(intensity: Color, direction: DVec3) -> Result<Self, MathError> {
        Ok(Self {
            intensity,
            direction: normalize(direction)?,
        })
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: DVec3) -> Color {
        self.intensity
    }

    fn direction_to(&self, _point: DVec3) -> Result<DVec3, MathError> {
        Ok(self.direction)
    }

    fn distance_to(&self, _point: DVec3) -> f64 {
        f64::INFINITY
    }
}
