//! Error types for versionbump
//!
//! Errors are layered: version-string errors, metadata/constant-file store
//! errors, and the orchestrator's own error which wraps both.

use std::path::PathBuf;

/// Errors produced while parsing or computing versions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// Text does not match `MAJOR.MINOR.PATCH[-dev.N]`
    #[error("Invalid version format: '{0}' (expected X.Y.Z or X.Y.Z-dev.N)")]
    InvalidFormat(String),

    /// Incrementing a component would exceed its range
    #[error("Version component '{component}' overflows when bumping {version}")]
    Overflow {
        component: &'static str,
        version: String,
    },
}

/// Errors reading or writing the on-disk version stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The metadata document does not exist
    #[error("{} not found", .0.display())]
    MissingFile(PathBuf),

    /// The metadata document has no usable version field
    #[error("Missing required field '{field}' in {}", .path.display())]
    MissingField { path: PathBuf, field: String },

    /// The metadata document is not valid TOML or has the wrong shape
    #[error("Invalid syntax in {}: {message}", .path.display())]
    InvalidSyntax { path: PathBuf, message: String },

    /// I/O error
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Top-level error for a bump or init invocation
#[derive(Debug, thiserror::Error)]
pub enum BumpError {
    /// More than one operation selector was supplied
    #[error("Conflicting arguments: choose only one of bump level, --prerelease, or --init")]
    ConflictingArguments,

    /// Version parse or arithmetic error
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Error reading a version store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error rewriting one of the two version stores
    #[error("Failed to update {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    /// Error reading the confirmation answer
    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
}
