//! Configuration system for yamlnav.
//!
//! Settings are read from `~/.config/yamlnav/config.toml`. Every field has a
//! default, so the file may set only what it wants to change, and a missing
//! or unreadable file simply yields [`Config::default`]. Command-line flags
//! override whatever the file says.
//!
//! # Example
//!
//! ```
//! use yamlnav::config::{Config, OutputFormat};
//!
//! let config: Config = toml::from_str(r#"
//!     output_format = "yaml"
//!
//!     [aliases]
//!     image-name = ["imageName"]
//! "#).unwrap();
//! assert_eq!(config.output_format, OutputFormat::Yaml);
//! assert!(config.show_positions);
//! assert_eq!(config.aliases.aliases_of("image-name"), &["imageName".to_string()]);
//! ```

use crate::yamlpath::KeyAliases;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How endpoints are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Scalars as their text, collections as a one-line summary
    #[default]
    Text,
    /// Every endpoint rendered as a YAML document
    Yaml,
}

/// Configuration for the yamlnav tool.
///
/// # Fields
///
/// * `output_format` - `text` or `yaml` (default: text)
/// * `show_positions` - Prefix each endpoint with `line:col` (default: true)
/// * `first_only` - Print only the first endpoint (default: false)
/// * `aliases` - Alternate spellings tried for `--property` keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output_format: OutputFormat,

    #[serde(default = "default_show_positions")]
    pub show_positions: bool,

    #[serde(default)]
    pub first_only: bool,

    #[serde(default)]
    pub aliases: KeyAliases,
}

fn default_show_positions() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            show_positions: default_show_positions(),
            first_only: false,
            aliases: KeyAliases::default(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlnav/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlnav");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(err) => {
                log::warn!("could not read config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}
