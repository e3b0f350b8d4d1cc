//! `_version.py` constant file
//!
//! The constant file mirrors the metadata document for code that imports the
//! version at run time. It is always rewritten in full.

use crate::error::StoreError;
use crate::types::Version;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Well-known constant file name
pub const VERSION_FILE: &str = "_version.py";

/// Name of the constant assigned in the file
pub const VERSION_CONSTANT: &str = "__version__";

static ASSIGNMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"__version__\s*=\s*['"]([^'"]+)['"]"#)
        .expect("assignment pattern is a valid regex")
});

/// Renders the single line written to the constant file
pub fn render(version: &Version) -> String {
    format!("{} = \"{}\"\n", VERSION_CONSTANT, version)
}

/// Overwrites `path` with the constant assignment for `version`
///
/// Any other content in the file is discarded. Missing parent directories
/// are created.
pub fn write(path: &Path, version: &Version) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    fs::write(path, render(version)).map_err(|e| StoreError::io(path, e))
}

/// Reads the value of the first `__version__` assignment in `path`
///
/// Returns `Ok(None)` if the file does not exist or has no assignment. The
/// value is returned unvalidated.
pub fn read(path: &Path) -> Result<Option<String>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Ok(extract(&content))
}

fn extract(content: &str) -> Option<String> {
    ASSIGNMENT_PATTERN
        .captures(content)
        .map(|caps| caps[1].to_string())
}
