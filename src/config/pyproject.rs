//! pyproject.toml access
//!
//! The metadata document is the canonical version store. It is read once per
//! invocation, mutated in memory and rewritten wholesale; tables and keys
//! other than `project.version` are carried through unchanged (comments and
//! formatting are not).

use crate::error::StoreError;
use crate::types::Version;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Default metadata document file name
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Version written into a freshly created metadata document
pub const DEFAULT_VERSION: Version = Version::new(0, 1, 0);

/// Dotted name of the version field, used in error messages
const VERSION_FIELD: &str = "project.version";

/// Settings read from the optional `[tool.versionbump]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolSettings {
    /// Constant file location, relative to the project root
    #[serde(default)]
    pub version_file: Option<PathBuf>,
}

/// An in-memory pyproject.toml document
#[derive(Debug, Clone)]
pub struct PyProject {
    path: PathBuf,
    document: Table,
}

impl PyProject {
    /// An empty document that will be written to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        PyProject {
            path: path.into(),
            document: Table::new(),
        }
    }

    /// Loads the document at `path`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingFile` if the file does not exist and
    /// `StoreError::InvalidSyntax` if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::MissingFile(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Self::parse(path, &content)
    }

    /// Loads the document at `path`, or an empty one if it does not exist
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        match Self::load(path.as_ref()) {
            Err(StoreError::MissingFile(path)) => Ok(Self::empty(path)),
            other => other,
        }
    }

    /// Parses document text; `path` is used for error reporting and saving
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, StoreError> {
        let path = path.into();
        let document = content
            .parse::<Table>()
            .map_err(|e| StoreError::InvalidSyntax {
                path: path.clone(),
                message: e.message().to_string(),
            })?;
        Ok(PyProject { path, document })
    }

    /// Returns the raw text of `project.version`
    ///
    /// The field may hold an array, in which case the last element is taken
    /// as current. That shape only appears in damaged documents and is kept
    /// for compatibility. Non-string values are returned in their TOML text
    /// form so the caller's validation reports them.
    pub fn version_text(&self) -> Result<String, StoreError> {
        let missing = || StoreError::MissingField {
            path: self.path.clone(),
            field: VERSION_FIELD.to_string(),
        };

        let value = self
            .document
            .get("project")
            .and_then(|project| project.get("version"))
            .ok_or_else(missing)?;

        match value {
            Value::Array(items) => {
                log::warn!(
                    "{} in {} is an array; using its last element",
                    VERSION_FIELD,
                    self.path.display()
                );
                items.last().map(value_text).ok_or_else(missing)
            }
            other => Ok(value_text(other)),
        }
    }

    /// Sets `project.version`, creating the `[project]` table if needed
    ///
    /// An array-valued field is replaced by a plain string.
    pub fn set_version(&mut self, version: &Version) -> Result<(), StoreError> {
        let project = self
            .document
            .entry("project")
            .or_insert(Value::Table(Table::new()));

        match project {
            Value::Table(table) => {
                table.insert("version".to_string(), Value::String(version.to_string()));
                Ok(())
            }
            _ => Err(StoreError::InvalidSyntax {
                path: self.path.clone(),
                message: "'project' must be a table".to_string(),
            }),
        }
    }

    /// Returns the `[tool.versionbump]` settings, or defaults if absent
    pub fn settings(&self) -> Result<ToolSettings, StoreError> {
        let Some(table) = self
            .document
            .get("tool")
            .and_then(|tool| tool.get("versionbump"))
        else {
            return Ok(ToolSettings::default());
        };

        table
            .clone()
            .try_into::<ToolSettings>()
            .map_err(|e| StoreError::InvalidSyntax {
                path: self.path.clone(),
                message: format!("[tool.versionbump]: {}", e),
            })
    }

    /// Serializes the whole document
    pub fn to_toml_string(&self) -> Result<String, StoreError> {
        toml::to_string(&self.document).map_err(|e| StoreError::InvalidSyntax {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Rewrites the document on disk
    pub fn save(&self) -> Result<(), StoreError> {
        let content = self.to_toml_string()?;
        fs::write(&self.path, content).map_err(|e| StoreError::io(&self.path, e))
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads the current version text from the document at `path`
///
/// # Errors
///
/// `MissingFile` if the document is absent (create one first with
/// [`ensure_default_document`]), `MissingField` if it has no version.
pub fn read_version(path: &Path) -> Result<String, StoreError> {
    PyProject::load(path)?.version_text()
}

/// Sets the version in the document at `path`, preserving other fields
///
/// A missing document is created.
pub fn write_version(path: &Path, version: &Version) -> Result<(), StoreError> {
    let mut pyproject = PyProject::load_or_empty(path)?;
    pyproject.set_version(version)?;
    pyproject.save()
}

/// Creates a document holding [`DEFAULT_VERSION`] if none exists
///
/// Returns `true` when a file was created.
pub fn ensure_default_document(path: &Path) -> Result<bool, StoreError> {
    if path.exists() {
        return Ok(false);
    }
    let mut pyproject = PyProject::empty(path);
    pyproject.set_version(&DEFAULT_VERSION)?;
    pyproject.save()?;
    Ok(true)
}

/// Reads `[tool.versionbump]` from the document at `path`
///
/// A missing document yields default settings.
pub fn read_settings(path: &Path) -> Result<ToolSettings, StoreError> {
    PyProject::load_or_empty(path)?.settings()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> PyProject {
        PyProject::parse(PYPROJECT_FILE, content).expect("valid toml")
    }

    #[test]
    fn test_version_text_string() {
        let doc = parse("[project]\nname = \"demo\"\nversion = \"1.4.2\"\n");
        assert_eq!(doc.version_text().unwrap(), "1.4.2");
    }

    #[test]
    fn test_version_text_array_uses_last_element() {
        let doc = parse("[project]\nversion = [\"1.0.0\", \"1.0.1\", \"1.1.0\"]\n");
        assert_eq!(doc.version_text().unwrap(), "1.1.0");
    }

    #[test]
    fn test_version_text_empty_array_is_missing() {
        let doc = parse("[project]\nversion = []\n");
        assert!(matches!(
            doc.version_text(),
            Err(StoreError::MissingField { .. })
        ));
    }

    #[test]
    fn test_version_text_missing_field() {
        let doc = parse("[project]\nname = \"demo\"\n");
        let err = doc.version_text().unwrap_err();
        assert!(matches!(err, StoreError::MissingField { ref field, .. } if field == "project.version"));
    }

    #[test]
    fn test_version_text_missing_project_table() {
        let doc = parse("[tool.other]\nkey = 1\n");
        assert!(matches!(
            doc.version_text(),
            Err(StoreError::MissingField { .. })
        ));
    }

    #[test]
    fn test_version_text_non_string_is_stringified() {
        let doc = parse("[project]\nversion = 3\n");
        assert_eq!(doc.version_text().unwrap(), "3");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = PyProject::parse(PYPROJECT_FILE, "[project\nversion = ").unwrap_err();
        assert!(matches!(err, StoreError::InvalidSyntax { .. }));
    }

    #[test]
    fn test_set_version_preserves_other_fields() {
        let mut doc = parse(
            "[project]\nname = \"demo\"\nversion = \"0.1.0\"\ndependencies = [\"requests\"]\n\n[tool.black]\nline-length = 100\n",
        );
        doc.set_version(&Version::new(0, 2, 0)).unwrap();

        let reparsed = parse(&doc.to_toml_string().unwrap());
        assert_eq!(reparsed.version_text().unwrap(), "0.2.0");
        assert_eq!(
            reparsed.document["project"]["name"].as_str(),
            Some("demo")
        );
        assert_eq!(
            reparsed.document["project"]["dependencies"][0].as_str(),
            Some("requests")
        );
        assert_eq!(
            reparsed.document["tool"]["black"]["line-length"].as_integer(),
            Some(100)
        );
    }

    #[test]
    fn test_set_version_replaces_array() {
        let mut doc = parse("[project]\nversion = [\"1.0.0\", \"1.0.1\"]\n");
        doc.set_version(&Version::new(1, 0, 2)).unwrap();
        assert!(doc.document["project"]["version"].is_str());
        assert_eq!(doc.version_text().unwrap(), "1.0.2");
    }

    #[test]
    fn test_set_version_creates_project_table() {
        let mut doc = PyProject::empty(PYPROJECT_FILE);
        doc.set_version(&Version::new(2, 0, 0)).unwrap();
        assert_eq!(doc.version_text().unwrap(), "2.0.0");
    }

    #[test]
    fn test_set_version_rejects_scalar_project() {
        let mut doc = parse("project = \"oops\"\n");
        assert!(matches!(
            doc.set_version(&Version::new(1, 0, 0)),
            Err(StoreError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_settings_default_when_absent() {
        let doc = parse("[project]\nversion = \"1.0.0\"\n");
        assert_eq!(doc.settings().unwrap(), ToolSettings::default());
    }

    #[test]
    fn test_settings_version_file() {
        let doc = parse(
            "[project]\nversion = \"1.0.0\"\n\n[tool.versionbump]\nversion-file = \"src/pkg/_version.py\"\n",
        );
        assert_eq!(
            doc.settings().unwrap().version_file,
            Some(PathBuf::from("src/pkg/_version.py"))
        );
    }

    #[test]
    fn test_settings_unknown_key_rejected() {
        let doc = parse("[tool.versionbump]\nversion_fil = \"x.py\"\n");
        assert!(matches!(
            doc.settings(),
            Err(StoreError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_read_version_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PYPROJECT_FILE);
        assert!(matches!(
            read_version(&path),
            Err(StoreError::MissingFile(_))
        ));
    }

    #[test]
    fn test_ensure_default_document_creates_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PYPROJECT_FILE);

        assert!(ensure_default_document(&path).unwrap());
        assert_eq!(read_version(&path).unwrap(), "0.1.0");

        write_version(&path, &Version::new(0, 5, 0)).unwrap();
        assert!(!ensure_default_document(&path).unwrap());
        assert_eq!(read_version(&path).unwrap(), "0.5.0");
    }

    #[test]
    fn test_write_version_creates_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PYPROJECT_FILE);

        write_version(&path, &Version::new(3, 0, 0).with_prerelease(1)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[project]"));
        assert!(content.contains("version = \"3.0.0-dev.1\""));
    }

    #[test]
    fn test_read_settings_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PYPROJECT_FILE);
        assert_eq!(read_settings(&path).unwrap(), ToolSettings::default());
    }
}
