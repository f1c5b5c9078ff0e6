//! Shell configuration loaded from `slashterm.toml`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Result, ShellError};
use crate::theme::Theme;

/// Top-level configuration. Every field has a default, so an empty file is
/// a valid configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// Character that marks a line as a command.
    #[serde(default = "default_marker")]
    pub marker: char,
    /// Root directory of the content store (resume data etc.).
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Theme used when no saved preference exists.
    #[serde(default)]
    pub theme: Theme,
    /// Where the host persists the theme preference, if anywhere.
    #[serde(default)]
    pub theme_file: Option<PathBuf>,
    /// Secrets for the special-mode puzzle.
    #[serde(default)]
    pub special: SpecialConfig,
}

/// Secrets for the two puzzle stages.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialConfig {
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_decrypt_code")]
    pub decrypt_code: String,
    #[serde(default = "default_decrypt_decimal")]
    pub decrypt_decimal: String,
}

fn default_marker() -> char {
    '/'
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_password() -> String {
    "dad626".to_string()
}

fn default_decrypt_code() -> String {
    "pizza".to_string()
}

fn default_decrypt_decimal() -> String {
    "3.14".to_string()
}

impl Default for SpecialConfig {
    fn default() -> Self {
        Self {
            password: default_password(),
            decrypt_code: default_decrypt_code(),
            decrypt_decimal: default_decrypt_decimal(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            content_dir: default_content_dir(),
            theme: Theme::default(),
            theme_file: None,
            special: SpecialConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML source.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: ShellConfig = toml::from_str(toml_str)
            .map_err(|e| ShellError::Config(format!("slashterm.toml: {e}")))?;
        if config.marker.is_whitespace() {
            return Err(ShellError::Config(
                "slashterm.toml: marker must not be whitespace".to_string(),
            ));
        }
        log::debug!("loaded config (marker '{}')", config.marker);
        Ok(config)
    }
}
