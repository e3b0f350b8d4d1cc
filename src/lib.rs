#![forbid(unsafe_code)]

//! versionbump: keep a project's semantic version in sync
//!
//! The version lives in two places: `project.version` in pyproject.toml
//! (canonical) and a `__version__` constant in `_version.py`. versionbump
//! initializes it, bumps the release level or the `-dev.N` prerelease
//! counter, and rewrites both files.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod types;

// Re-export error types for convenient access
pub use error::{BumpError, StoreError, VersionError};

// Re-export core domain types for convenient access
pub use types::{BumpLevel, Version, bump_prerelease_str, bump_release_str};
