// Line-based terminal I/O behind a trait so editor flows can be scripted

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::engine::platform;

/// Line-oriented console used by the interactive editor
pub trait Console {
    /// Show `prompt` and read one line without its line terminator.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print one line
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Clear the screen before a redraw
    fn clear(&mut self) -> io::Result<()>;
}

/// Process stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stdout(), "{}", text)
    }

    fn clear(&mut self) -> io::Result<()> {
        // Piped output keeps its history
        if io::stdout().is_terminal() {
            platform::clear_screen()?;
        }
        Ok(())
    }
}

/// Console fed from a fixed list of lines, recording everything shown.
///
/// Used by tests and by non-interactive callers that replay answers.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    /// Prompts, echoed answers and printed lines, in order
    pub output: String,
    /// Number of screen clears requested
    pub clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.push_str(prompt);
        let line = self.input.pop_front();
        if let Some(line) = &line {
            self.output.push_str(line);
        }
        self.output.push('\n');
        Ok(line)
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        self.output.push('\n');
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}
