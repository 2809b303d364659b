//! Lumen Core - renderer-agnostic scene description values.
//!
//! This crate provides:
//!
//! - **Surface description**: `Material` (Phong coefficients) and `Color`
//! - **Lighting**: `AmbientLight` and the `LightSource` trait with point,
//!   spot and directional lights
//! - **Soft shadows**: `TargetArea`, the jittered sample grid used to
//!   approximate area lights

pub mod light;
pub mod material;
pub mod target_area;

// Re-export commonly used types
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{Color, Material};
pub use target_area::TargetArea;
