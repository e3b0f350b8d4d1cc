//! CLI argument parsing using clap

use crate::types::BumpLevel;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable status lines
    Human,
    /// One JSON object describing the result
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// versionbump CLI
///
/// The bump level, `--prerelease` and `--init` select the operation; at most
/// one may be given. Conflicts are reported by the orchestrator rather than
/// by clap so that they exit with status 1.
#[derive(Parser, Debug)]
#[command(name = "versionbump")]
#[command(about = "Bump or initialize the project version in pyproject.toml and _version.py")]
#[command(version)]
pub struct Cli {
    /// Bump level (default: patch)
    #[arg(value_enum)]
    pub level: Option<BumpLevel>,

    /// Increment the prerelease counter (e.g. -dev.0 -> -dev.1)
    #[arg(long)]
    pub prerelease: bool,

    /// Initialize versioning to the given version
    #[arg(long, value_name = "X.Y.Z")]
    pub init: Option<String>,

    /// Apply without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Project root
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Metadata document, relative to the project root
    #[arg(long, value_name = "PATH")]
    pub pyproject: Option<PathBuf>,

    /// Constant file, relative to the project root (skips the search)
    #[arg(long, value_name = "PATH")]
    pub version_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Output coloring
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
