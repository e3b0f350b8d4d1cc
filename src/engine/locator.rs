//! Constant file discovery
//!
//! Finds the project's `_version.py` by name anywhere under the project
//! root, gitignored or not. When several candidates exist the shallowest one
//! wins, ties broken by path order, so the result does not depend on
//! directory listing order.

use crate::config::ToolSettings;
use crate::config::version_file::VERSION_FILE;
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Where the constant file path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFileSource {
    /// `--version-file` on the command line
    Explicit,
    /// `[tool.versionbump] version-file`
    Configured,
    /// Found by searching the project tree
    Discovered,
    /// Nothing found; `_version.py` in the project root
    Default,
}

impl VersionFileSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionFileSource::Explicit => "command line",
            VersionFileSource::Configured => "[tool.versionbump]",
            VersionFileSource::Discovered => "search",
            VersionFileSource::Default => "default",
        }
    }
}

/// A resolved constant file location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFileLocation {
    pub path: PathBuf,
    pub source: VersionFileSource,
}

/// Searches `root` for a file named `_version.py`
///
/// Ignore files (`.gitignore`, `.ignore`, global excludes) are not
/// consulted. Hidden directories are visited; `.git` is never entered. Unreadable entries are
/// skipped with a warning.
pub fn find_version_file(root: &Path) -> Option<PathBuf> {
    find_named(root, OsStr::new(VERSION_FILE))
}

fn find_named(root: &Path, name: &OsStr) -> Option<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(false) // Don't skip hidden directories
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .filter_entry(|entry| entry.file_name() != OsStr::new(".git"))
        .build();

    let mut best: Option<(usize, PathBuf)> = None;

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) || entry.file_name() != name {
            continue;
        }

        log::debug!("Candidate version file: {}", entry.path().display());

        let candidate = (entry.depth(), entry.into_path());
        best = match best {
            Some(current) if current <= candidate => Some(current),
            _ => Some(candidate),
        };
    }

    best.map(|(_, path)| path)
}

/// Resolves the constant file path
///
/// Precedence: `explicit`, then `settings.version_file`, then a search of
/// `root`, then `root/_version.py`. Relative explicit and configured paths
/// are taken relative to `root`.
pub fn resolve_version_file(
    root: &Path,
    explicit: Option<&Path>,
    settings: &ToolSettings,
) -> VersionFileLocation {
    if let Some(path) = explicit {
        return VersionFileLocation {
            path: root.join(path),
            source: VersionFileSource::Explicit,
        };
    }

    if let Some(path) = &settings.version_file {
        return VersionFileLocation {
            path: root.join(path),
            source: VersionFileSource::Configured,
        };
    }

    match find_version_file(root) {
        Some(path) => VersionFileLocation {
            path,
            source: VersionFileSource::Discovered,
        },
        None => VersionFileLocation {
            path: root.join(VERSION_FILE),
            source: VersionFileSource::Default,
        },
    }
}
