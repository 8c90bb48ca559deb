//! Input validation for the menu shell
//!
//! Parses positive integers and non-empty names from raw input lines.
//! Invalid input never escapes this module: the `read_*` helpers print the
//! rejection and prompt again. Only end of input or an I/O failure is
//! returned to the caller.

use core::num::NonZeroU32;
use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::{IntegerError, ShellError};

/// Strip leading and trailing ASCII whitespace
pub fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Parse a positive decimal integer
///
/// Only ASCII digits are accepted once surrounding whitespace is removed,
/// so signs and separators are rejected. Values past `u32::MAX` are
/// rejected rather than wrapped.
pub fn parse_positive(input: &str) -> Result<NonZeroU32, IntegerError> {
    let digits = trim(input);
    if digits.is_empty() {
        return Err(IntegerError::Empty);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntegerError::NotDigits);
    }
    // Only overflow can fail here
    let value: u32 = digits.parse().map_err(|_| IntegerError::TooLarge)?;
    NonZeroU32::new(value).ok_or(IntegerError::NotPositive)
}

/// Read one line, failing with [`ShellError::InputClosed`] at end of input
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so
/// they reach validation like any other bad input.
pub fn read_line<R: BufRead>(input: &mut R) -> Result<String, ShellError> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Err(ShellError::InputClosed);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Prompt until a positive integer is entered
pub fn read_positive_integer<R: BufRead, W: Write>(
    input: &mut R,
    console: &mut Console<W>,
    prompt: &str,
) -> Result<NonZeroU32, ShellError> {
    loop {
        console.prompt(prompt)?;
        let line = read_line(input)?;
        match parse_positive(&line) {
            Ok(value) => return Ok(value),
            Err(e) => {
                console.trace(format_args!("rejected {:?}: {:?}", trim(&line), e));
                writeln!(console, "{}", e)?;
            }
        }
    }
}

/// Prompt until a non-blank line is entered, returning it trimmed
pub fn read_non_empty<R: BufRead, W: Write>(
    input: &mut R,
    console: &mut Console<W>,
    prompt: &str,
    error: &str,
) -> Result<String, ShellError> {
    loop {
        console.prompt(prompt)?;
        let line = read_line(input)?;
        let text = trim(&line);
        if !text.is_empty() {
            return Ok(text.to_string());
        }
        writeln!(console, "{}", error)?;
    }
}
