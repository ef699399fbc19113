//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::file::ConfigFile;
use crate::{BindingConfig, ConfigError, ConfigResult, PROJECT_CONFIG_FILE};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding `library.sdl`
pub const ENV_SDL_LIBRARY: &str = "SDLBIND_SDL_LIBRARY";
/// Environment variable overriding `library.ttf`
pub const ENV_TTF_LIBRARY: &str = "SDLBIND_TTF_LIBRARY";
/// Environment variable overriding `library.image`
pub const ENV_IMAGE_LIBRARY: &str = "SDLBIND_IMAGE_LIBRARY";
/// Extra search directories, in the platform's PATH list syntax
pub const ENV_SEARCH_PATH: &str = "SDLBIND_SEARCH_PATH";
/// Environment variable overriding `logging.filter`
pub const ENV_LOG: &str = "SDLBIND_LOG";
/// Environment variable overriding `logging.forward_native_log`
pub const ENV_FORWARD_NATIVE_LOG: &str = "SDLBIND_FORWARD_NATIVE_LOG";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Built-in defaults - lowest priority
/// 2. User config (~/.sdlbind/config.toml)
/// 3. Project config (./sdlbind.toml) - overrides user config
/// 4. Environment variables (SDLBIND_*) - highest priority
pub struct ConfigLoader {
    /// Cached user config path
    global_config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Create a loader that reads the user config from a fixed path
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find sdlbind.toml, layers it over the
    /// user config and applies environment overrides last.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<BindingConfig> {
        let mut config = BindingConfig::default();

        if let Some(global) = self.load_global_config()? {
            config.apply(&global);
        }

        if let Some((root, project)) = find_project_config(start_dir)? {
            config.apply(&project);
            config.project_root = Some(root);
        }

        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<BindingConfig> {
        let mut config = BindingConfig::default();

        if let Some(global) = self.load_global_config()? {
            config.apply(&global);
        }

        let project = ConfigFile::load_from_file(config_path)?;
        config.apply(&project);
        config.project_root = config_path.parent().map(|p| p.to_path_buf());

        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Load configuration from the current working directory
    pub fn load_default(&mut self) -> ConfigResult<BindingConfig> {
        let cwd = env::current_dir()?;
        self.load_from_directory(&cwd)
    }

    /// Load the user configuration, if present
    fn load_global_config(&mut self) -> ConfigResult<Option<ConfigFile>> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match Self::global_config_path() {
                Ok(path) => {
                    self.global_config_path = Some(path.clone());
                    path
                }
                // No home directory means no user config
                Err(ConfigError::HomeNotFound) => return Ok(None),
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            return Ok(None);
        }

        ConfigFile::load_from_file(&path).map(Some)
    }

    /// Get the user configuration directory (~/.sdlbind)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".sdlbind"))
    }

    /// Get the user config file path (~/.sdlbind/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        Ok(Self::global_config_dir()?.join("config.toml"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the project configuration by walking up the directory tree
fn find_project_config(start_dir: &Path) -> ConfigResult<Option<(PathBuf, ConfigFile)>> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(PROJECT_CONFIG_FILE);

        if config_path.exists() {
            let project = ConfigFile::load_from_file(&config_path)?;
            return Ok(Some((current, project)));
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Ok(None),
        }
    }
}

/// Apply SDLBIND_* environment variable overrides
fn apply_env_overrides(config: &mut BindingConfig) -> ConfigResult<()> {
    if let Some(sdl) = non_empty_var(ENV_SDL_LIBRARY) {
        config.library.sdl = sdl;
    }
    if let Some(ttf) = non_empty_var(ENV_TTF_LIBRARY) {
        config.library.ttf = ttf;
    }
    if let Some(image) = non_empty_var(ENV_IMAGE_LIBRARY) {
        config.library.image = image;
    }

    if let Some(paths) = env::var_os(ENV_SEARCH_PATH) {
        let mut merged: Vec<PathBuf> = env::split_paths(&paths)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        merged.append(&mut config.library.search_paths);
        config.library.search_paths = merged;
    }

    if let Some(filter) = non_empty_var(ENV_LOG) {
        config.logging.filter = filter;
    }

    if let Ok(forward) = env::var(ENV_FORWARD_NATIVE_LOG) {
        config.logging.forward_native_log = parse_bool(ENV_FORWARD_NATIVE_LOG, &forward)?;
    }

    Ok(())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(field: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}
