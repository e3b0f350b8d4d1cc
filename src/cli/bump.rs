//! Bump/init orchestration
//!
//! One invocation walks these stages in order:
//! - resolve the metadata document, creating a default one if absent
//! - resolve the constant file
//! - compute the new version
//! - confirm, unless auto-confirmed (declining ends the run with no writes)
//! - write the metadata document, then the constant file
//!
//! The two writes are not a transaction. If the constant file write fails
//! after pyproject.toml was updated, the stores are left inconsistent and
//! the error names the file that failed.

use crate::cli::args::{Cli, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_SUCCESS, color_choice, display_path, stderr_is_terminal, stdout_is_terminal,
};
use crate::cli::prompt;
use crate::config::pyproject::{self, DEFAULT_VERSION, PYPROJECT_FILE};
use crate::config::version_file;
use crate::engine::locator::{VersionFileSource, resolve_version_file};
use crate::error::{BumpError, StoreError, VersionError};
use crate::output::{BumpRecord, Console};
use crate::types::{BumpLevel, Version};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use termcolor::{StandardStream, WriteColor};

/// What the invocation should do to the version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Increment a release component
    Release(BumpLevel),
    /// Start or advance the `-dev.N` counter
    Prerelease,
    /// Set an explicit version
    Init(Version),
}

impl Operation {
    /// Builds the operation from the three mutually exclusive selectors
    ///
    /// # Errors
    ///
    /// `ConflictingArguments` if more than one selector is set, checked
    /// before the `--init` value is validated.
    pub fn from_selectors(
        level: Option<BumpLevel>,
        prerelease: bool,
        init: Option<&str>,
    ) -> Result<Self, BumpError> {
        let selected = [level.is_some(), prerelease, init.is_some()]
            .iter()
            .filter(|set| **set)
            .count();
        if selected > 1 {
            return Err(BumpError::ConflictingArguments);
        }

        if let Some(text) = init {
            return Ok(Operation::Init(Version::parse(text)?));
        }
        if prerelease {
            return Ok(Operation::Prerelease);
        }
        Ok(Operation::Release(level.unwrap_or_default()))
    }

    /// Computes the version that follows `current`
    pub fn apply(&self, current: &Version) -> Result<Version, VersionError> {
        match self {
            Operation::Release(level) => current.bump_release(*level),
            Operation::Prerelease => current.bump_prerelease(),
            Operation::Init(version) => Ok(*version),
        }
    }
}

/// A fully resolved invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpRequest {
    /// Project root; other paths are relative to it
    pub root: PathBuf,
    pub operation: Operation,
    /// Metadata document; `pyproject.toml` when `None`
    pub pyproject: Option<PathBuf>,
    /// Constant file; resolved from settings or by search when `None`
    pub version_file: Option<PathBuf>,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

impl BumpRequest {
    pub fn new(root: impl Into<PathBuf>, operation: Operation) -> Self {
        BumpRequest {
            root: root.into(),
            operation,
            pyproject: None,
            version_file: None,
            assume_yes: false,
        }
    }

    /// Builds a request from parsed command-line arguments
    pub fn from_cli(cli: &Cli) -> Result<Self, BumpError> {
        let operation = Operation::from_selectors(cli.level, cli.prerelease, cli.init.as_deref())?;
        Ok(BumpRequest {
            root: cli.directory.clone(),
            operation,
            pyproject: cli.pyproject.clone(),
            version_file: cli.version_file.clone(),
            assume_yes: cli.yes,
        })
    }

    fn pyproject_path(&self) -> PathBuf {
        self.root
            .join(self.pyproject.as_deref().unwrap_or(Path::new(PYPROJECT_FILE)))
    }
}

/// How an invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpOutcome {
    /// Both stores were written
    Applied {
        /// `None` for `--init`
        old_version: Option<Version>,
        new_version: Version,
        files: Vec<PathBuf>,
    },
    /// The confirmation was declined; nothing was written
    Aborted {
        old_version: Option<Version>,
        new_version: Version,
    },
}

/// Runs one bump or init against `request.root`
///
/// Status lines and the confirmation prompt go to `console`; the answer is
/// read from `input`.
pub fn execute<R: BufRead, W: WriteColor>(
    request: &BumpRequest,
    input: &mut R,
    console: &mut Console<W>,
) -> Result<BumpOutcome, BumpError> {
    let root = request.root.as_path();

    // Resolve the metadata document
    let pyproject_path = request.pyproject_path();
    log::debug!("Metadata document: {}", pyproject_path.display());
    let created = pyproject::ensure_default_document(&pyproject_path).map_err(|source| {
        BumpError::WriteFailure {
            path: pyproject_path.clone(),
            source,
        }
    })?;
    if created {
        console.success(format!(
            "Default {} created with version {}.",
            display_path(root, &pyproject_path).display(),
            DEFAULT_VERSION
        ));
    }

    // Resolve the constant file
    let settings = pyproject::read_settings(&pyproject_path)?;
    let location = resolve_version_file(root, request.version_file.as_deref(), &settings);
    log::debug!(
        "Version file: {} (from {})",
        location.path.display(),
        location.source.as_str()
    );
    if location.source == VersionFileSource::Default && !location.path.exists() {
        console.info(format!(
            "Creating version file at {}",
            display_path(root, &location.path).display()
        ));
    }

    // Compute the new version
    let (old_version, new_version) = match request.operation {
        Operation::Init(version) => {
            console.plain(format!("Initializing version: {}", version));
            (None, version)
        }
        operation => {
            let current_text = pyproject::read_version(&pyproject_path)?;
            let current = Version::parse(&current_text)?;
            let next = operation.apply(&current)?;
            warn_on_drift(root, &location.path, &current_text, console);
            console.plain(format!("Current version: {}", current));
            console.plain(format!("New version:     {}", next));
            (Some(current), next)
        }
    };
    log::debug!("Computed version {:?} -> {}", old_version, new_version);

    // Confirm
    if !request.assume_yes {
        let question = match request.operation {
            Operation::Init(_) => format!("Initialize version to {}?", new_version),
            _ => "Apply version bump?".to_string(),
        };
        let accepted =
            prompt::confirm(input, console, &question).map_err(BumpError::Prompt)?;
        if !accepted {
            log::debug!("Confirmation declined");
            console.plain("Aborted.");
            return Ok(BumpOutcome::Aborted {
                old_version,
                new_version,
            });
        }
    }

    // Write both stores, metadata document first
    pyproject::write_version(&pyproject_path, &new_version).map_err(|source| {
        BumpError::WriteFailure {
            path: pyproject_path.clone(),
            source,
        }
    })?;
    version_file::write(&location.path, &new_version).map_err(|source| {
        BumpError::WriteFailure {
            path: location.path.clone(),
            source,
        }
    })?;

    let files = vec![
        display_path(root, &pyproject_path),
        display_path(root, &location.path),
    ];
    console.success(format!(
        "Version set to {}. Updated files: {}, {}",
        new_version,
        files[0].display(),
        files[1].display()
    ));

    Ok(BumpOutcome::Applied {
        old_version,
        new_version,
        files,
    })
}

/// Notes when the constant file disagrees with pyproject.toml
///
/// pyproject.toml stays canonical; the constant file is overwritten anyway.
fn warn_on_drift<W: WriteColor>(
    root: &Path,
    version_file_path: &Path,
    canonical: &str,
    console: &mut Console<W>,
) {
    match version_file::read(version_file_path) {
        Ok(Some(found)) if found != canonical => console.info(format!(
            "{} holds {}; {} is canonical",
            display_path(root, version_file_path).display(),
            found,
            PYPROJECT_FILE
        )),
        Ok(_) => {}
        Err(StoreError::Io { path, source }) => {
            log::warn!("Could not read {}: {}", path.display(), source);
        }
        Err(e) => log::warn!("{}", e),
    }
}

/// Entry point for the binary: runs one invocation and returns the exit code
///
/// Exit code:
/// - 0: Success, or the confirmation was declined
/// - 1: Conflicting arguments, invalid version, missing field or write failure
pub fn run_bump(cli: &Cli) -> i32 {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    match cli.format {
        OutputFormat::Human => {
            let stream = StandardStream::stdout(color_choice(cli.color, stdout_is_terminal()));
            let mut console = Console::new(stream);
            match BumpRequest::from_cli(cli).and_then(|r| execute(&r, &mut input, &mut console)) {
                Ok(_) => EXIT_SUCCESS,
                Err(e) => {
                    console.error(e.to_string());
                    EXIT_ERROR
                }
            }
        }
        OutputFormat::Jsonl => {
            // Human lines and the prompt move to stderr so stdout holds only JSON
            let stream = StandardStream::stderr(color_choice(cli.color, stderr_is_terminal()));
            let mut console = Console::new(stream);
            let (record, code) =
                match BumpRequest::from_cli(cli).and_then(|r| execute(&r, &mut input, &mut console))
                {
                    Ok(outcome) => (BumpRecord::from_outcome(&outcome), EXIT_SUCCESS),
                    Err(e) => {
                        console.error(e.to_string());
                        (BumpRecord::from_error(&e), EXIT_ERROR)
                    }
                };
            print!("{}", record.to_json_line());
            code
        }
    }
}
