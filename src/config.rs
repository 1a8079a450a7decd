//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{DEFAULT_DESCRIBE_MODEL, DEFAULT_EDIT_MODEL};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default values used when the matching CLI flag is absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Default shot settings from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Image edit model name or alias.
    pub model: String,
    /// Model used to describe the style reference.
    pub describe_model: String,
    /// Aspect ratio preset id.
    pub aspect_ratio: String,
    /// Lighting preset id.
    pub lighting: String,
    /// Camera perspective preset id.
    pub perspective: String,
    /// Image size.
    pub size: String,
    /// Output format.
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_EDIT_MODEL.to_string(),
            describe_model: DEFAULT_DESCRIBE_MODEL.to_string(),
            aspect_ratio: "1:1".to_string(),
            lighting: "soft_studio".to_string(),
            perspective: "front_on".to_string(),
            size: "1K".to_string(),
            format: "png".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Gemini API key, preferring environment variable.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.keys.gemini.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `PRODSHOT_CONFIG` environment variable
/// 3. `~/.config/prodshot/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("PRODSHOT_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/prodshot/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/prodshot/config.toml")
    } else {
        PathBuf::from("prodshot.toml")
    }
}
