//! Editor configuration (`~/.pomedit/config.toml`)

use pomedit_fs::{FileSystem, NativeFileSystem};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Defaults applied to every command; flags on the command line win
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Manifest to edit
    #[serde(default = "default_pom_file")]
    pub pom_file: PathBuf,

    /// Where to move the previous manifest on save
    #[serde(default)]
    pub pom_backup: Option<PathBuf>,

    /// Encoding of properties files
    #[serde(default = "default_properties_encoding")]
    pub properties_encoding: String,
}

fn default_pom_file() -> PathBuf {
    PathBuf::from("pom.xml")
}

fn default_properties_encoding() -> String {
    "UTF-8".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pom_file: default_pom_file(),
            pom_backup: None,
            properties_encoding: default_properties_encoding(),
        }
    }
}

impl EditorConfig {
    /// Get the default config path (~/.pomedit/config.toml)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".pomedit").join("config.toml"))
    }

    /// Load the configuration for this run
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::config_path() {
            Ok(path) => match Self::load_from(&path) {
                Err(ConfigError::ConfigNotFound(_)) => {
                    debug!(path = %path.display(), "No config file, using defaults");
                    Ok(Self::default())
                }
                other => other,
            },
            Err(ConfigError::HomeNotFound) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load config from a specific path (relative to the working directory)
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let fs = NativeFileSystem::current_dir()?;
        if !fs.exists(path)? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = fs.read_to_string(path)?;
        let config: EditorConfig = toml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}
