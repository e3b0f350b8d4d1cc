//! Test utilities for versionbump integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Writes a pyproject.toml with `[project] version = "<version>"`
pub fn write_pyproject(root: &Path, version: &str) {
    let content = format!(
        "[project]\nname = \"demo\"\nversion = \"{}\"\n\n[tool.black]\nline-length = 100\n",
        version
    );
    fs::write(root.join("pyproject.toml"), content).unwrap();
}

/// Writes a constant file at `relative` under `root`
pub fn write_version_file(root: &Path, relative: &str, version: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, format!("__version__ = \"{}\"\n", version)).unwrap();
}

/// Reads `project.version` back out of pyproject.toml
pub fn pyproject_version(root: &Path) -> String {
    let content = fs::read_to_string(root.join("pyproject.toml")).unwrap();
    let table: toml::Table = content.parse().unwrap();
    table["project"]["version"].as_str().unwrap().to_string()
}

pub fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}
