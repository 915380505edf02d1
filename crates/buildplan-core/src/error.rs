//! Error types for buildplan-core

use std::path::PathBuf;

/// Result type for buildplan-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// A descriptor that breaks one of the plan invariants.
///
/// `field` is the dotted path of the offending value, for example
/// `sdk.min` or `dependencies[1].scope`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// A required field is absent from every descriptor layer.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "required field is missing")
    }

    /// Wrap a vocabulary parse failure for `field`.
    pub fn from_meta(field: impl Into<String>, err: buildplan_meta::Error) -> Self {
        Self::new(field, err.to_string())
    }
}

/// Errors that can occur while loading and resolving descriptors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Descriptor file not found at expected path
    #[error("Descriptor not found at {path}")]
    DescriptorNotFound { path: PathBuf },

    /// File extension does not map to a supported descriptor format
    #[error("Unsupported descriptor format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// A descriptor layer failed to parse
    #[error("Invalid descriptor at {path}: {message}")]
    InvalidDescriptor { path: PathBuf, message: String },

    /// The merged descriptor failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
