//! Error types for Portship
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::policies::PolicyError;
use crate::domain::ports::IndexError;
use crate::domain::services::CompileError;

/// Result type alias for Portship operations
pub type PortshipResult<T> = Result<T, PortshipError>;

/// Main error type for Portship operations
#[derive(Error, Debug)]
pub enum PortshipError {
    /// Graph compilation failed
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Index could not be read or decoded
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Config value out of range
    #[error("invalid setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },

    /// Conversion table is inconsistent
    #[error("invalid conversion policy: {0}")]
    InvalidPolicy(#[from] PolicyError),

    /// Explicitly requested config file is missing
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
