//! Gear file handling for filmtag.
//!
//! Loads the gear database from `~/.config/filmtag/gear.toml` or a custom path,
//! writing the built-in defaults there on first run.

use std::path::{Path, PathBuf};

use crate::gear::GearConfig;

impl GearConfig {
    /// Load the gear database from a file path.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the gear database, creating it with the built-in gear if the file
    /// doesn't exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            log::debug!("Loading gear from {}", path.display());
            return Self::load(path);
        }

        println!("No gear file found, creating default at: {}", path.display());
        let gear = Self::builtin();
        gear.save(path)?;
        Ok(gear)
    }

    /// Load the gear database if the file exists, otherwise fall back to the
    /// built-in gear without writing anything.
    pub fn load_or_builtin(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path);
        }
        log::info!("No gear file at {}, using built-in gear", path.display());
        Ok(Self::builtin())
    }

    /// Write the gear database, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            path: path.to_path_buf(),
            source: e,
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path, content).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("Saved gear to {}", path.display());
        Ok(())
    }
}

/// Errors that can occur when loading or saving the gear file.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    SerializeError {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(f, "Failed to access gear file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse gear file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { path, source } => {
                write!(f, "Failed to encode gear for '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::SerializeError { source, .. } => Some(source),
        }
    }
}

/// Get the default gear file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("filmtag").join("gear.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/filmtag/gear.toml")
        })
}
