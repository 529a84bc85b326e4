//! I/O boundary traits for testability
//!
//! The evaluator only talks to a [`Console`], so it can be driven by a
//! scripted sequence of answers instead of a real terminal.

use std::io::{self, BufRead, Write};

/// Line-oriented interaction with the user.
pub trait Console {
    /// Print a full line.
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Print `prompt` without a newline and block for one line of input.
    /// Returns None once input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Console over any buffered reader and writer.
#[derive(Debug)]
pub struct IoConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> IoConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the console and hand back the writer (captured output in tests).
    pub fn into_output(self) -> W {
        self.output
    }
}

impl IoConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for IoConsole<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)?;
        self.output.flush()
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&line);
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_strips_line_endings_only() {
        let mut console = IoConsole::new(Cursor::new(" yes \r\nno\nlast"), Vec::new());

        assert_eq!(console.ask("Q1: ").unwrap().as_deref(), Some(" yes "));
        assert_eq!(console.ask("Q2: ").unwrap().as_deref(), Some("no"));
        assert_eq!(console.ask("Q3: ").unwrap().as_deref(), Some("last"));
        assert_eq!(console.ask("Q4: ").unwrap(), None);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Q1: Q2: Q3: Q4: ");
    }

    #[test]
    fn test_say_appends_newline() {
        let mut console = IoConsole::new(Cursor::new(""), Vec::new());
        console.say("done").unwrap();
        assert_eq!(console.into_output(), b"done\n");
    }
}
