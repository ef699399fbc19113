//! Error types for the bindings

use crate::ffi::{LoadError, MarshalError};
use sdlbind_config::ConfigError;
use thiserror::Error;

/// Any failure reported by this crate
#[derive(Error, Debug)]
pub enum Error {
    /// A library could not be opened or a symbol was missing
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An argument could not be converted to its native form
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A native call reported failure; carries the native error string
    #[error("native call failed: {0}")]
    Native(String),
}

impl Error {
    /// Native error message, if this is a native failure
    pub fn native_message(&self) -> Option<&str> {
        match self {
            Error::Native(message) => Some(message),
            _ => None,
        }
    }
}

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, Error>;
