//! Operator input from the terminal

use alarm_lib::LineSource;
use std::io::{self, BufRead, Write};

/// Reads answers line by line, printing each prompt first
pub struct TerminalInput<R, W> {
    reader: R,
    prompt_out: W,
}

impl TerminalInput<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for TerminalInput<R, W> {
    /// An undecodable line is consumed and reported as `InvalidData`, so the
    /// next read starts on the following line.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.prompt_out, "{}", prompt)?;
        self.prompt_out.flush()?;

        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line =
            String::from_utf8(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}
