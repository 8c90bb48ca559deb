//! Console output for procsim
//!
//! Wraps the session's output stream. User-facing text goes through the
//! [`Write`] impl; diagnostics go to stderr through [`Console::trace`] and
//! only when verbose output is enabled.

use std::fmt;
use std::io::{self, Write};

/// ANSI sequence: erase display, cursor home
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Console writer interface
pub struct Console<W: Write> {
    out: W,
    clear_screen: bool,
    verbose: bool,
}

impl<W: Write> Console<W> {
    /// Create a console writing to `out`
    pub fn new(out: W, clear_screen: bool, verbose: bool) -> Self {
        Self {
            out,
            clear_screen,
            verbose,
        }
    }

    /// Clear the terminal, if enabled
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Write a prompt without a trailing newline
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    /// Emit a diagnostic line on stderr when verbose
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        if self.verbose {
            eprintln!("[procsim] {}", args);
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Write for Console<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_disabled_writes_nothing() {
        let mut console = Console::new(Vec::new(), false, false);
        console.clear().unwrap();
        assert!(console.into_inner().is_empty());
    }

    #[test]
    fn test_clear_and_prompt() {
        let mut console = Console::new(Vec::new(), true, false);
        console.clear().unwrap();
        console.prompt("PID: ").unwrap();
        writeln!(console, "ok").unwrap();

        let text = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(text, format!("{}PID: ok\n", CLEAR_SCREEN));
    }
}
