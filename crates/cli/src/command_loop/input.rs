use std::io::{BufRead, Write};

use jackfront_core::config::PROMPT;
use jackfront_core::error::{Error, Result};

use super::types::Command;

/// Prompts for and reads one command line.
///
/// Returns `None` at end of input. Bytes that are not valid UTF-8 are replaced
/// instead of failing the read.
///
/// # Errors
///
/// Returns [`Error::Stdio`] if the prompt cannot be written or the line cannot be read.
pub fn read_command<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<Command>> {
    write!(output, "{PROMPT}").map_err(Error::Stdio)?;
    output.flush().map_err(Error::Stdio)?;

    let mut line = Vec::new();
    let read = input.read_until(b'\n', &mut line).map_err(Error::Stdio)?;

    if read == 0 {
        return Ok(None);
    }

    Ok(Some(Command::parse(&String::from_utf8_lossy(&line))))
}
