//! Interactive confirmation

use crate::output::Console;
use std::io::{self, BufRead};
use termcolor::WriteColor;

/// Returns true for `y` or `yes`, ignoring case and surrounding whitespace
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Asks `question` and reads one line of `input`
///
/// End of input counts as a refusal. Blocks until a line is available.
pub fn confirm<R: BufRead, W: WriteColor>(
    input: &mut R,
    console: &mut Console<W>,
    question: &str,
) -> io::Result<bool> {
    console.prompt(&format!("{} [y/N]: ", question));

    let mut answer = String::new();
    let read = input.read_line(&mut answer)?;
    if read == 0 {
        // Keep the terminal tidy when stdin is closed
        console.plain("");
        return Ok(false);
    }

    Ok(is_affirmative(&answer))
}
