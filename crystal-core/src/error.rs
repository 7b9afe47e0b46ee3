//! Error types shared by the crystal crates

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or resizing a scene
#[derive(Error, Debug)]
pub enum Error {
    /// A viewport dimension was zero
    #[error("Invalid viewport size {width}x{height}: both dimensions must be non-zero")]
    InvalidViewport { width: u32, height: u32 },

    /// A config value parsed but is outside the range the scene can use
    #[error("Invalid config value for {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// The config file could not be read
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for a scene
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The config string is not valid JSON for a scene
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for crystal operations
pub type Result<T> = std::result::Result<T, Error>;
