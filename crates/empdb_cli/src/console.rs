//! Console I/O abstraction for the interactive shell.
//!
//! # Responsibility
//! - Wrap a reader/writer pair so menus can be driven by real stdin/stdout
//!   or by scripted buffers in tests.
//!
//! # Invariants
//! - Prompts flush the writer before blocking on input.
//! - End of input is reported as `None`, never as an error.

use std::io::{self, BufRead, Write};

/// Line-oriented console over any `BufRead`/`Write` pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Writes an empty line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Prints `prompt` without a newline, then reads one line of input.
    ///
    /// Returns `None` when the input stream is exhausted. The returned line
    /// is trimmed of surrounding whitespace.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buffer = String::new();
        let read = self.input.read_line(&mut buffer)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }

    /// Consumes the wrapped writer so tests can assert on captured output.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::Console;
    use std::io::Cursor;

    #[test]
    fn prompt_returns_trimmed_line() {
        let input = Cursor::new(b"  hello  \n".to_vec());
        let mut console = Console::new(input, Vec::new());

        let answer = console.prompt("> ").expect("prompt should not fail");
        assert_eq!(answer.as_deref(), Some("hello"));

        let output = String::from_utf8(console.into_output()).expect("output should be UTF-8");
        assert_eq!(output, "> ");
    }

    #[test]
    fn prompt_reports_end_of_input_as_none() {
        let input = Cursor::new(Vec::new());
        let mut console = Console::new(input, Vec::new());

        let answer = console.prompt("> ").expect("prompt should not fail");
        assert_eq!(answer, None);
    }
}
