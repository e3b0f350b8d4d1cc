//! On-disk version stores: pyproject.toml and the `_version.py` constant file

pub mod pyproject;
pub mod version_file;

pub use pyproject::{DEFAULT_VERSION, PYPROJECT_FILE, PyProject, ToolSettings};
pub use version_file::VERSION_FILE;
