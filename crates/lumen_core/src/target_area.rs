//! Jittered sample grid for soft shadows.

use lumen_math::{is_zero, DVec3};
use rand::{Rng, RngCore};

/// A square patch around a light used to approximate an area light.
///
/// Shadow rays are cast to every sample of the patch instead of to the
/// light's single position; averaging their transparency yields a penumbra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetArea {
    /// Center of the patch (the light's position)
    pub center: DVec3,
    /// Half-width of the patch
    pub rib: f64,
    /// Grid resolution; samples are spaced `rib / grid` apart
    pub grid: u32,
}

impl TargetArea {
    /// Create a new target area.
    pub fn new(center: DVec3, rib: f64, grid: u32) -> Self {
        Self { center, rib, grid }
    }

    /// Returns true if the area produces no samples (acts as a point light).
    pub fn is_point(&self) -> bool {
        self.grid == 0 || is_zero(self.rib)
    }

    /// Scatter jittered sample points on the plane orthogonal to `v_to`.
    ///
    /// Produces a `(2 * (grid / 2) + 1)²` grid centered on `center`. Every
    /// offset from the center is jittered by up to one cell; the center
    /// sample itself is exact. Returns an empty list for a point area.
    pub fn scatter_points(&self, v_to: DVec3, rng: &mut dyn RngCore) -> Vec<DVec3> {
        if self.is_point() {
            return Vec::new();
        }

        let v_x = v_to.any_orthonormal_vector();
        let v_y = v_x.cross(v_to).normalize();

        let cell = self.rib / self.grid as f64;
        let half = (self.grid / 2) as i64;
        let side = (2 * half + 1) as usize;

        let mut points = Vec::with_capacity(side * side);
        for i in -half..=half {
            for j in -half..=half {
                let mut p = self.center;
                if j != 0 {
                    p += v_y * (j as f64 * cell + rng.gen::<f64>() * cell);
                }
                if i != 0 {
                    p += v_x * (i as f64 * cell + rng.gen::<f64>() * cell);
                }
                points.push(p);
            }
        }
        points
    }
}
