//! sdlbind Configuration System
//!
//! Decides which native libraries the bindings open and how the crate logs:
//! - Project configuration (sdlbind.toml)
//! - User configuration (~/.sdlbind/config.toml)
//! - Environment overrides (SDLBIND_*)
//!
//! # Configuration Hierarchy
//!
//! Configuration is merged in the following order (later overrides earlier):
//! 1. Built-in defaults (`SDL3`, `SDL3_ttf`, `SDL3_image`, filter `info`)
//! 2. User config (~/.sdlbind/config.toml)
//! 3. Project config (./sdlbind.toml, searched upwards)
//! 4. Environment variables (SDLBIND_*)
//!
//! # Example
//!
//! ```no_run
//! use sdlbind_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("opening {}", config.library.sdl);
//! ```

pub mod file;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = "sdlbind.toml";

/// Default logical name of the core library
pub const DEFAULT_SDL_LIBRARY: &str = "SDL3";
/// Default logical name of the font library
pub const DEFAULT_TTF_LIBRARY: &str = "SDL3_ttf";
/// Default logical name of the image library
pub const DEFAULT_IMAGE_LIBRARY: &str = "SDL3_image";
/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Effective configuration after every source has been merged
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BindingConfig {
    pub library: LibraryConfig,
    pub logging: LoggingConfig,

    /// Directory holding the project sdlbind.toml, if one was found
    pub project_root: Option<PathBuf>,
}

/// Which shared libraries to open and where to look for them
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryConfig {
    /// Logical name (`SDL3`) or explicit path of the core library
    pub sdl: String,
    pub ttf: String,
    pub image: String,

    /// Directories searched before the platform loader's own lookup
    pub search_paths: Vec<PathBuf>,
}

/// Logging settings consumed by `sdlbind::logging`
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string
    pub filter: String,

    /// Route the native library's own log output into tracing
    pub forward_native_log: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            sdl: DEFAULT_SDL_LIBRARY.to_string(),
            ttf: DEFAULT_TTF_LIBRARY.to_string(),
            image: DEFAULT_IMAGE_LIBRARY.to_string(),
            search_paths: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            forward_native_log: false,
        }
    }
}

impl BindingConfig {
    /// Overlay the values present in a parsed config file
    pub fn apply(&mut self, file: &file::ConfigFile) {
        if let Some(library) = &file.library {
            if let Some(sdl) = &library.sdl {
                self.library.sdl = sdl.clone();
            }
            if let Some(ttf) = &library.ttf {
                self.library.ttf = ttf.clone();
            }
            if let Some(image) = &library.image {
                self.library.image = image.clone();
            }
            if let Some(paths) = &library.search_paths {
                // Later sources are searched first
                let mut merged = paths.clone();
                merged.extend(self.library.search_paths.drain(..));
                self.library.search_paths = merged;
            }
        }

        if let Some(logging) = &file.logging {
            if let Some(filter) = &logging.filter {
                self.logging.filter = filter.clone();
            }
            if let Some(forward) = logging.forward_native_log {
                self.logging.forward_native_log = forward;
            }
        }
    }

    /// Check if a project sdlbind.toml contributed to this config
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}

// Re-export main types
pub use file::ConfigFile;
pub use loader::ConfigLoader;
