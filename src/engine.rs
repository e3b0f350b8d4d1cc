//! Project tree discovery

pub mod locator;

pub use locator::{VersionFileLocation, VersionFileSource, find_version_file, resolve_version_file};
