//! Render configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid render config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Worker threads; 0 renders sequentially on the calling thread
    pub threads: usize,
    /// Maximum recursion depth for reflection and refraction
    pub max_level: u32,
    /// Branches whose accumulated coefficient falls below this are dropped
    pub min_k: f64,
    /// Reorganize the scene into a BVH before rendering
    pub use_bvh: bool,
    /// Percentage of pixels between progress log lines (0 disables them)
    pub progress_step: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            max_level: 10,
            min_k: 0.001,
            use_bvh: true,
            progress_step: 10,
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_min_k(mut self, min_k: f64) -> Self {
        self.min_k = min_k;
        self
    }
}
