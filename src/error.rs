//! Error types
//!
//! A single error enum covers configuration validation, manifest reading and
//! the generic I/O failures of the command layer.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DocblockError>;

#[derive(Debug, Error)]
pub enum DocblockError {
    #[error("Annotation key \"{0}\" cannot be empty")]
    EmptyTag(String),

    #[error("Invalid annotation key \"{0}\". Must start with letter and contain only letters, numbers, underscore, or dash.")]
    InvalidTagName(String),

    #[error("Unknown annotation \"{key}\". Allowed annotations: {allowed}")]
    UnknownTag { key: String, allowed: String },

    #[error("The file \"{}\" does not exist.", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Unable to read file \"{}\": {source}", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to decode JSON from file \"{}\": {reason}", .path.display())]
    ManifestDecode { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl DocblockError {
    /// Whether this error came from tag validation at configuration time
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            DocblockError::EmptyTag(_)
                | DocblockError::InvalidTagName(_)
                | DocblockError::UnknownTag { .. }
        )
    }

    /// Whether this error came from the manifest reader
    pub fn is_manifest_failure(&self) -> bool {
        matches!(
            self,
            DocblockError::ManifestNotFound(_)
                | DocblockError::ManifestUnreadable { .. }
                | DocblockError::ManifestDecode { .. }
        )
    }
}
