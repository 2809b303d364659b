//! Camera for ray generation.

use lumen_math::{align_zero, is_zero, normalize, DVec3, MathError, Ray};
use thiserror::Error;

/// Errors raised while building a camera.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("missing camera field: {0}")]
    MissingField(&'static str),

    #[error("invalid camera field {field}: {value}")]
    InvalidField { field: &'static str, value: f64 },

    #[error("camera direction vectors must be orthogonal")]
    NotOrthogonal,

    #[error("camera direction {0} has zero length")]
    ZeroDirection(&'static str),
}

/// A pinhole camera looking through a rectangular view plane.
///
/// Built with [`Camera::builder`]; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: DVec3,
    v_to: DVec3,
    v_up: DVec3,
    v_right: DVec3,
    width: f64,
    height: f64,
    distance: f64,
    // Center of the view plane
    p_center: DVec3,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn v_to(&self) -> DVec3 {
        self.v_to
    }

    pub fn v_up(&self) -> DVec3 {
        self.v_up
    }

    pub fn v_right(&self) -> DVec3 {
        self.v_right
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Construct the ray through the center of pixel (`column`, `row`) of
    /// an `nx` by `ny` grid laid over the view plane.
    ///
    /// Row 0 is the top of the image.
    pub fn construct_ray(&self, nx: u32, ny: u32, column: u32, row: u32) -> Result<Ray, MathError> {
        let rx = self.width / nx as f64;
        let ry = self.height / ny as f64;

        let xj = (column as f64 - (nx as f64 - 1.0) / 2.0) * rx;
        let yi = -(row as f64 - (ny as f64 - 1.0) / 2.0) * ry;

        let mut p_ij = self.p_center;
        if !is_zero(xj) {
            p_ij += self.v_right * xj;
        }
        if !is_zero(yi) {
            p_ij += self.v_up * yi;
        }

        Ray::new(self.position, p_ij - self.position)
    }
}

/// Accumulates camera settings; [`CameraBuilder::build`] validates them.
///
/// The builder can be reused: every build returns an independent camera.
#[derive(Debug, Clone, Default)]
pub struct CameraBuilder {
    position: Option<DVec3>,
    v_to: Option<DVec3>,
    v_up: Option<DVec3>,
    width: Option<f64>,
    height: Option<f64>,
    distance: Option<f64>,
}

impl CameraBuilder {
    /// Set the camera position.
    pub fn location(mut self, position: DVec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the viewing direction and the up vector; they must be orthogonal.
    pub fn direction(mut self, v_to: DVec3, v_up: DVec3) -> Self {
        self.v_to = Some(v_to);
        self.v_up = Some(v_up);
        self
    }

    /// Set the view plane size in world units.
    pub fn vp_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the distance from the camera to the view plane.
    pub fn vp_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Validate the settings and compute the camera basis.
    pub fn build(&self) -> Result<Camera, CameraError> {
        let position = self.position.ok_or(CameraError::MissingField("position"))?;
        let v_up = self.v_up.ok_or(CameraError::MissingField("v_up"))?;
        let v_to = self.v_to.ok_or(CameraError::MissingField("v_to"))?;
        let height = positive("height", self.height)?;
        let width = positive("width", self.width)?;
        let distance = positive("distance", self.distance)?;

        let v_to = normalize(v_to).map_err(|_| CameraError::ZeroDirection("v_to"))?;
        let v_up = normalize(v_up).map_err(|_| CameraError::ZeroDirection("v_up"))?;
        if align_zero(v_to.dot(v_up)) != 0.0 {
            return Err(CameraError::NotOrthogonal);
        }

        let v_right = v_to.cross(v_up);
        Ok(Camera {
            position,
            v_to,
            v_up,
            v_right,
            width,
            height,
            distance,
            p_center: position + v_to * distance,
        })
    }
}

fn positive(field: &'static str, value: Option<f64>) -> Result<f64, CameraError> {
    let value = value.ok_or(CameraError::MissingField(field))?;
    if value <= 0.0 || !value.is_finite() {
        return Err(CameraError::InvalidField { field, value });
    }
    Ok(value)
}
