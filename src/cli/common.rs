//! Common helpers shared by the CLI entry points

use crate::cli::args::ColorChoice;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Success, or the user declined the confirmation
pub const EXIT_SUCCESS: i32 = 0;
/// Validation error, conflicting arguments or write failure
pub const EXIT_ERROR: i32 = 1;

/// Shortens `path` to be relative to `root` for display
///
/// Paths outside `root` are returned unchanged.
pub(crate) fn display_path(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// Maps the `--color` choice onto termcolor for a stream
///
/// `auto` only colors when the stream is a terminal.
pub(crate) fn color_choice(choice: ColorChoice, is_terminal: bool) -> termcolor::ColorChoice {
    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if is_terminal => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}

pub(crate) fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

pub(crate) fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}
