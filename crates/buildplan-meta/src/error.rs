//! Error types for buildplan-meta

pub type Result<T> = std::result::Result<T, Error>;

/// Parse failures for descriptor vocabulary values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown dependency scope '{value}' (expected one of: compile-time, runtime, provided)")]
    UnknownScope { value: String },

    #[error("unsupported JVM level '{value}' (expected one of: 1.8, 11, 17, 21)")]
    UnknownJavaVersion { value: String },

    #[error("invalid dependency coordinate '{notation}': {reason}")]
    InvalidCoordinate { notation: String, reason: String },

    #[error("invalid version constraint '{constraint}': {reason}")]
    VersionConstraintParse { constraint: String, reason: String },

    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    #[error("invalid identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },
}
