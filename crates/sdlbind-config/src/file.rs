//! Configuration file format
//!
//! Both the project `sdlbind.toml` and the user `~/.sdlbind/config.toml`
//! share this layout. Every field is optional so a file only states what it
//! changes.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parsed configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Shared library selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibrarySection>,

    /// Logging settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingSection>,
}

/// `[library]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LibrarySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdl: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttf: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_paths: Option<Vec<PathBuf>>,
}

/// `[logging]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_native_log: Option<bool>,
}

impl ConfigFile {
    /// Load a configuration file from disk
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config = Self::parse(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string without validation
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(library) = &self.library {
            validate_library_name("library.sdl", library.sdl.as_deref())?;
            validate_library_name("library.ttf", library.ttf.as_deref())?;
            validate_library_name("library.image", library.image.as_deref())?;
        }

        if let Some(filter) = self.logging.as_ref().and_then(|l| l.filter.as_deref()) {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "logging.filter".to_string(),
                    reason: "filter must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn validate_library_name(field: &str, value: Option<&str>) -> ConfigResult<()> {
    match value {
        Some(name) if name.trim().is_empty() => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "library name must not be empty".to_string(),
        }),
        Some(name) if name.contains('\0') => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("library name '{}' contains a NUL byte", name.escape_debug()),
        }),
        _ => Ok(()),
    }
}
