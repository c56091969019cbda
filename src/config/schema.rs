//! Configuration schema types for `emojirain.toml`
//!
//! Only CLI behaviour is configurable. The animation itself has fixed
//! parameters and nothing here changes them.

use serde::{Deserialize, Serialize};

/// Default number of frames `simulate` runs (10 seconds at 60 fps).
pub const DEFAULT_FRAMES: u32 = 600;

/// Default simulated frame duration in milliseconds (60 fps).
pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

/// Codec command settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Pretty-print JSON produced by `decode`
    pub pretty: bool,
}

/// Headless simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulateConfig {
    /// Frames to run
    pub frames: u32,
    /// Simulated milliseconds per frame
    pub frame_ms: f64,
    /// Random seed; unset means a fresh seed per run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self { frames: DEFAULT_FRAMES, frame_ms: DEFAULT_FRAME_MS, seed: None }
    }
}

/// Complete `emojirain.toml` contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub codec: CodecConfig,
    pub simulate: SimulateConfig,
}

/// A field that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "simulate.frames")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "emojirain.toml: '{}' {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.simulate.frames == 0 {
            errors.push(ConfigValidationError {
                field: "simulate.frames".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if !(self.simulate.frame_ms.is_finite() && self.simulate.frame_ms > 0.0) {
            errors.push(ConfigValidationError {
                field: "simulate.frame_ms".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
