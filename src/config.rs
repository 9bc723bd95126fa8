use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub picker: PickerConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Show dot-files when listing a directory
    pub show_hidden: bool,
    /// List directories before files
    pub dirs_first: bool,
    /// File extensions shown with the executable icon (without the dot)
    pub executable_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Use colors in the picker
    pub color: bool,
    /// Width of the size column in characters
    pub size_column: u16,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            show_hidden: true,
            dirs_first: true,
            executable_extensions: [
                "exe", "com", "bat", "cmd", "msi", "ps1", "scr", "sh", "appimage", "run", "bin",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            color: true,
            size_column: 10,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location if it exists.
    ///
    /// An explicit path must exist. Without one, a missing default file
    /// simply yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let mut config: Config =
            toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");

        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/uninstall-targets/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("uninstall-targets").join("config.toml"))
    }

    /// Check values and normalize extensions (lowercase, no leading dot).
    pub fn validate(&mut self) -> std::result::Result<(), ConfigError> {
        let mut normalized = Vec::with_capacity(self.picker.executable_extensions.len());
        for ext in &self.picker.executable_extensions {
            let ext = ext.trim().trim_start_matches('.').to_lowercase();
            if ext.is_empty() {
                return Err(ConfigError::Invalid(
                    "executable extension must not be empty".into(),
                ));
            }
            if ext.contains('/') || ext.contains('\\') {
                return Err(ConfigError::Invalid(format!(
                    "executable extension '{}' must not contain a path separator",
                    ext
                )));
            }
            normalized.push(ext);
        }
        self.picker.executable_extensions = normalized;

        if self.tui.size_column < 4 {
            return Err(ConfigError::Invalid(format!(
                "size column must be at least 4 characters wide, got {}",
                self.tui.size_column
            )));
        }

        Ok(())
    }
}
