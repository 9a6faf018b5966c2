//! Configuration system for docpath.
//!
//! This module provides the configuration structure for docpath with sensible
//! defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments; hide paths given on the command line are added to the ones
//! configured here.
//!
//! # Example
//!
//! ```
//! use docpath::config::Config;
//! use docpath::file::saver::OutputFormat;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.format, OutputFormat::Yaml);
//! assert_eq!(config.max_depth, 256);
//!
//! // Create custom configuration
//! let custom = Config {
//!     format: OutputFormat::Json,
//!     hide_key: vec!["/**/examples".to_string()],
//!     ..Config::default()
//! };
//! assert!(!custom.hide_options().is_empty());
//! ```

use crate::file::saver::OutputFormat;
use crate::options::HideOptions;
use crate::path::{Walker, DEFAULT_MAX_DEPTH};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the docpath application.
///
/// # Fields
///
/// * `format` - Output format, "yaml" or "json" (default: "yaml")
/// * `max_depth` - Nesting limit for a single path walk (default: 256)
/// * `hide_key` - Paths always removed (default: none)
/// * `hide_key_if_empty` - Paths removed when empty (default: none)
/// * `log_level` - Default log filter when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Nesting limit for a single path walk
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Paths always removed
    #[serde(default)]
    pub hide_key: Vec<String>,

    /// Paths removed when their value is empty
    #[serde(default)]
    pub hide_key_if_empty: Vec<String>,

    /// Default log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            max_depth: default_max_depth(),
            hide_key: Vec::new(),
            hide_key_if_empty: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/docpath/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("docpath");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file, reporting read and
    /// parse failures.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn try_load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific TOML file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves configuration to a specific file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Returns a walker honouring `max_depth`.
    pub fn walker(&self) -> Walker {
        Walker::with_max_depth(self.max_depth)
    }

    /// Returns the configured hide paths.
    pub fn hide_options(&self) -> HideOptions {
        HideOptions {
            hide_key: self.hide_key.clone(),
            hide_key_if_empty: self.hide_key_if_empty.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.log_level, "warn");
        assert!(config.hide_options().is_empty());
    }

    #[test]
    fn test_walker_uses_max_depth() {
        let config = Config {
            max_depth: 8,
            ..Default::default()
        };
        assert_eq!(config.walker().max_depth(), 8);
    }
}
