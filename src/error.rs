//! Error types for SonataExtra
//!
//! All modules use `SonataResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for SonataExtra operations
pub type SonataResult<T> = Result<T, SonataError>;

/// All errors that can occur in SonataExtra
#[derive(Error, Debug)]
pub enum SonataError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Manifest errors
    #[error("Asset manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Invalid asset manifest at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    // Asset errors
    #[error("Failed to minify inline {kind}: {reason}")]
    Minify { kind: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl SonataError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a minification error for the given language
    pub fn minify(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Minify {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ManifestNotFound(_) => Some("Pass the path of an existing assets.toml"),
            Self::ManifestInvalid { .. } => {
                Some("Blocks live under [blocks.<name>] with css, css_inline, js, js_inline lists")
            }
            Self::Minify { .. } => Some("Fix the inline source or render without --compress"),
            _ => None,
        }
    }
}
