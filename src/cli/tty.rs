//! Line-oriented terminal I/O over any reader / writer pair.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};

/// ANSI: erase the screen, then home the cursor.
const CLEAR_SEQ: &[u8] = b"\x1b[2J\x1b[H";
const PROMPT: &str = ">>> ";

pub struct Console<R, W> {
    input: R,
    output: W,
    clear: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Screen clearing is off until [`with_clear`](Self::with_clear).
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear: false,
        }
    }

    #[must_use]
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Show the prompt and read one line without its terminator.
    /// `None` at end of input.
    ///
    /// # Errors
    /// I/O on either side.
    pub fn prompt(&mut self) -> io::Result<Option<String>> {
        self.output.write_all(PROMPT.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// # Errors
    /// I/O on the output.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// # Errors
    /// I/O on the output.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear {
            self.output.write_all(CLEAR_SEQ)?;
            self.output.flush()?;
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_strips_terminators() {
        let mut con = Console::new(Cursor::new("1234\r\n*\n"), Vec::new());
        assert_eq!(con.prompt().unwrap().as_deref(), Some("1234"));
        assert_eq!(con.prompt().unwrap().as_deref(), Some("*"));
        assert_eq!(con.prompt().unwrap(), None);
        let out = String::from_utf8(con.into_output()).unwrap();
        assert_eq!(out, ">>> >>> >>> ");
    }

    #[test]
    fn clear_only_when_enabled() {
        let mut quiet = Console::new(Cursor::new(""), Vec::new());
        quiet.clear().unwrap();
        assert!(quiet.into_output().is_empty());

        let mut loud = Console::new(Cursor::new(""), Vec::new()).with_clear(true);
        loud.clear().unwrap();
        assert_eq!(loud.into_output(), CLEAR_SEQ);
    }
}
