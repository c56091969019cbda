//! Configuration loading and discovery for `emojirain.toml`
//!
//! Provides functions to find, load, and merge configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::Config;

/// File name looked up during discovery.
pub const CONFIG_FILE: &str = "emojirain.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse emojirain.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub pretty: Option<bool>,
    pub frames: Option<u32>,
    pub frame_ms: Option<f64>,
    pub seed: Option<u64>,
}

/// Find emojirain.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for emojirain.toml
/// 2. Check XDG_CONFIG_HOME/emojirain/emojirain.toml (or ~/.config/emojirain/emojirain.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find emojirain.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("emojirain").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find emojirain.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the discovered file is used,
/// or the defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(Config::default()),
    }
}

fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Apply CLI overrides on top of a loaded configuration.
pub fn merge_cli_overrides(mut config: Config, overrides: &CliOverrides) -> Config {
    if let Some(pretty) = overrides.pretty {
        config.codec.pretty = pretty;
    }
    if let Some(frames) = overrides.frames {
        config.simulate.frames = frames;
    }
    if let Some(frame_ms) = overrides.frame_ms {
        config.simulate.frame_ms = frame_ms;
    }
    if let Some(seed) = overrides.seed {
        config.simulate.seed = Some(seed);
    }
    config
}
