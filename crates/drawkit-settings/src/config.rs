//! Configuration for the conversion engine
//!
//! Configuration is organized into logical sections:
//! - Conversion settings (curve flattening, stroke outlining, default style)
//! - Import settings (fallback picture size, default font size)
//!
//! Files are JSON or TOML, chosen by extension. Missing fields fall back to
//! their defaults so partial files are accepted.

use drawkit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings used by the geometry kernel and the path converter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Maximum distance between a curve and its flattened polyline
    pub flatten_tolerance: f64,
    /// Multiplier applied to stroke thickness when outlining strokes
    pub stroke_width_scale: f64,
    /// Resolution scale handed to the stroker (higher = finer curves)
    pub stroke_resolution_scale: f32,
    /// Name given to freshly created styles
    pub default_style_name: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            flatten_tolerance: 0.1,
            stroke_width_scale: 1.0,
            stroke_resolution_scale: 1.0,
            default_style_name: "Default".to_string(),
        }
    }
}

/// Settings used when importing pictures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Width reported when the document declares no size and draws nothing
    pub default_width: f64,
    /// Height reported when the document declares no size and draws nothing
    pub default_height: f64,
    /// Font size used for text without an explicit size
    pub default_font_size: f64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            default_width: 0.0,
            default_height: 0.0,
            default_font_size: 12.0,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Conversion settings
    pub conversion: ConversionSettings,
    /// Import settings
    pub import: ImportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/drawkit/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drawkit")
            .join("config.toml")
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::other("Config file must be .json or .toml"));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::other("Config file must be .json or .toml"));
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.conversion.flatten_tolerance > 0.0) {
            return Err(Error::other("Flatten tolerance must be > 0"));
        }

        if !(self.conversion.stroke_width_scale > 0.0) {
            return Err(Error::other("Stroke width scale must be > 0"));
        }

        if !(self.conversion.stroke_resolution_scale > 0.0) {
            return Err(Error::other("Stroke resolution scale must be > 0"));
        }

        if self.import.default_width < 0.0 || self.import.default_height < 0.0 {
            return Err(Error::other("Default import size must not be negative"));
        }

        if !(self.import.default_font_size > 0.0) {
            return Err(Error::other("Default font size must be > 0"));
        }

        Ok(())
    }
}
