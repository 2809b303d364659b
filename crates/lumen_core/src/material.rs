//! Phong material coefficients.

use lumen_math::DVec3;

/// Color type alias (linear RGB, 1.0 is full intensity per channel).
pub type Color = DVec3;

/// Surface reflectance under the Phong model.
///
/// Every coefficient is a per-channel triple in `[0, 1]`. They need not sum
/// to one; the tracer bounds energy only through its recursion threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Material {
    /// Diffuse coefficient
    pub kd: DVec3,

    /// Specular coefficient
    pub ks: DVec3,

    /// Transmission (transparency) coefficient
    pub kt: DVec3,

    /// Reflection coefficient
    pub kr: DVec3,

    /// Specular exponent
    pub shininess: u32,
}

impl Material {
    /// Create a black, fully opaque material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffuse coefficient on all channels.
    pub fn with_kd(mut self, kd: f64) -> Self {
        self.kd = DVec3::splat(kd);
        self
    }

    /// Set the specular coefficient on all channels.
    pub fn with_ks(mut self, ks: f64) -> Self {
        self.ks = DVec3::splat(ks);
        self
    }

    /// Set the transmission coefficient on all channels.
    pub fn with_kt(mut self, kt: f64) -> Self {
        self.kt = DVec3::splat(kt);
        self
    }

    /// Set the transmission coefficient per channel.
    pub fn with_kt_rgb(mut self, kt: DVec3) -> Self {
        self.kt = kt;
        self
    }

    /// Set the reflection coefficient on all channels.
    pub fn with_kr(mut self, kr: f64) -> Self {
        self.kr = DVec3::splat(kr);
        self
    }

    /// Set the reflection coefficient per channel.
    pub fn with_kr_rgb(mut self, kr: DVec3) -> Self {
        self.kr = kr;
        self
    }

    /// Set the specular exponent.
    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Check if this material lets any light through.
    pub fn is_transparent(&self) -> bool {
        self.kt.max_element() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_is_opaque_black() {
        let material = Material::default();
        assert_eq!(material.kd, DVec3::ZERO);
        assert_eq!(material.shininess, 0);
        assert!(!material.is_transparent());
    }

    #[test]
    fn test_material_builders() {
        let material = Material::new()
            .with_kd(0.5)
            .with_ks(0.25)
            .with_shininess(30)
            .with_kt_rgb(DVec3::new(0.5, 0.0, 0.0));

        assert_eq!(material.kd, DVec3::splat(0.5));
        assert_eq!(material.ks, DVec3::splat(0.25));
        assert_eq!(material.shininess, 30);
        assert!(material.is_transparent());
    }
}
