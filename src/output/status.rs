#![forbid(unsafe_code)]

//! Human-readable status lines
//!
//! Every line is prefixed with a glyph: `✓` for success, `ℹ` for
//! information, `✗` for errors. Glyphs are colored when the writer supports
//! it.

use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Info,
    Error,
}

impl Status {
    pub fn glyph(&self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Info => "ℹ",
            Status::Error => "✗",
        }
    }

    fn color(&self) -> Color {
        match self {
            Status::Success => Color::Green,
            Status::Info => Color::Blue,
            Status::Error => Color::Red,
        }
    }
}

/// Writes status lines and prompts to a terminal stream
///
/// Write failures are logged and otherwise ignored; losing a status line
/// never changes the outcome of an invocation.
pub struct Console<W: WriteColor> {
    out: W,
}

impl<W: WriteColor> Console<W> {
    pub fn new(out: W) -> Self {
        Console { out }
    }

    pub fn success(&mut self, message: impl AsRef<str>) {
        self.status(Status::Success, message.as_ref());
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.status(Status::Info, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.status(Status::Error, message.as_ref());
    }

    /// A line without glyph
    pub fn plain(&mut self, message: impl AsRef<str>) {
        let result = writeln!(self.out, "{}", message.as_ref());
        self.report(result);
    }

    /// Writes `question` without a trailing newline and flushes
    pub fn prompt(&mut self, question: &str) {
        let result = write!(self.out, "{}", question).and_then(|()| self.out.flush());
        self.report(result);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn status(&mut self, status: Status, message: &str) {
        let result = self.write_status(status, message);
        self.report(result);
    }

    fn write_status(&mut self, status: Status, message: &str) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(status.color())).set_bold(true))?;
        write!(self.out, "{}", status.glyph())?;
        self.out.reset()?;
        writeln!(self.out, " {}", message)
    }

    fn report(&self, result: io::Result<()>) {
        if let Err(e) = result {
            log::debug!("Failed to write console output: {}", e);
        }
    }
}
