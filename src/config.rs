//! Bridge configuration module.
//!
//! Handles loading and validating `config.toml`. Every key has a default,
//! so the file only needs the values that differ.
//!
//! ## Config File Location
//!
//! `config.toml` is read from the directory given by `--config-dir`
//! (the current directory by default). It is not read from the image
//! folders themselves.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [picker]
//! message = "Select a folder containing images for your slide show"
//! prompt = "Open"           # Label of the confirm action
//!
//! [output]
//! show_content = false      # Print the JSON after creating a manifest
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file inside the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Bridge configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Texts for the folder picker.
    pub picker: PickerConfig,
    /// CLI reporting settings.
    pub output: OutputConfig,
}

impl BridgeConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.picker.message.trim().is_empty() {
            return Err(ConfigError::Validation(
                "picker.message must not be empty".into(),
            ));
        }
        if self.picker.prompt.trim().is_empty() {
            return Err(ConfigError::Validation(
                "picker.prompt must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Folder picker texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    /// Explanation shown above the folder chooser.
    pub message: String,
    /// Label of the confirm action.
    pub prompt: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            message: "Select a folder containing images for your slide show".to_string(),
            prompt: "Open".to_string(),
        }
    }
}

/// CLI reporting settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// After creating a manifest, also print its JSON content.
    pub show_content: bool,
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file means stock defaults. Missing keys fall back to their
/// defaults through `#[serde(default)]`; unknown keys are errors.
pub fn load_config(dir: &Path) -> Result<BridgeConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    let config: BridgeConfig = if config_path.is_file() {
        toml::from_str(&fs::read_to_string(&config_path)?)?
    } else {
        BridgeConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Slideshow Bridge Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Folder picker
# ---------------------------------------------------------------------------
[picker]
# Explanation shown above the folder chooser.
message = "Select a folder containing images for your slide show"

# Label of the confirm action.
prompt = "Open"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Print the JSON content after creating a slideshow.json.
show_content = false
"##
}
