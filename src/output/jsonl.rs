#![forbid(unsafe_code)]

//! Machine-readable result record
//!
//! With `--format jsonl` a single JSON object describing the invocation is
//! written to stdout:
//!
//! ```json
//! {"status":"applied","old_version":"1.2.3","new_version":"1.2.4","files":["pyproject.toml","_version.py"]}
//! ```

use crate::cli::bump::BumpOutcome;
use serde::Serialize;
use std::path::PathBuf;

/// Final state of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Applied,
    Aborted,
    Error,
}

/// The one JSON object written per invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpRecord {
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BumpRecord {
    pub fn from_outcome(outcome: &BumpOutcome) -> Self {
        match outcome {
            BumpOutcome::Applied {
                old_version,
                new_version,
                files,
            } => BumpRecord {
                status: RecordStatus::Applied,
                old_version: old_version.map(|v| v.to_string()),
                new_version: Some(new_version.to_string()),
                files: files.clone(),
                message: None,
            },
            BumpOutcome::Aborted {
                old_version,
                new_version,
            } => BumpRecord {
                status: RecordStatus::Aborted,
                old_version: old_version.map(|v| v.to_string()),
                new_version: Some(new_version.to_string()),
                files: Vec::new(),
                message: None,
            },
        }
    }

    pub fn from_error(error: &dyn std::error::Error) -> Self {
        BumpRecord {
            status: RecordStatus::Error,
            old_version: None,
            new_version: None,
            files: Vec::new(),
            message: Some(error.to_string()),
        }
    }

    /// Serializes the record as one line, newline-terminated
    pub fn to_json_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => format!("{}\n", json),
            Err(e) => {
                log::error!("Failed to serialize result record: {}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BumpError;
    use crate::types::Version;

    #[test]
    fn test_applied_record() {
        let outcome = BumpOutcome::Applied {
            old_version: Some(Version::new(1, 2, 3)),
            new_version: Version::new(1, 2, 4),
            files: vec![PathBuf::from("pyproject.toml"), PathBuf::from("_version.py")],
        };

        let line = BumpRecord::from_outcome(&outcome).to_json_line();

        assert_eq!(
            line,
            "{\"status\":\"applied\",\"old_version\":\"1.2.3\",\"new_version\":\"1.2.4\",\"files\":[\"pyproject.toml\",\"_version.py\"]}\n"
        );
    }

    #[test]
    fn test_aborted_record_omits_files() {
        let outcome = BumpOutcome::Aborted {
            old_version: None,
            new_version: Version::new(2, 0, 0),
        };

        let value: serde_json::Value =
            serde_json::from_str(&BumpRecord::from_outcome(&outcome).to_json_line()).unwrap();

        assert_eq!(value["status"], "aborted");
        assert_eq!(value["new_version"], "2.0.0");
        assert!(value.get("old_version").is_none());
        assert!(value.get("files").is_none());
    }

    #[test]
    fn test_error_record() {
        let record = BumpRecord::from_error(&BumpError::ConflictingArguments);
        let value: serde_json::Value = serde_json::from_str(&record.to_json_line()).unwrap();

        assert_eq!(value["status"], "error");
        assert!(
            value["message"]
                .as_str()
                .unwrap()
                .starts_with("Conflicting arguments")
        );
    }
}
