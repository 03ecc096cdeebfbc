//! Line-oriented output sinks
//!
//! The walker never prints directly; it hands finished lines and warnings to
//! a `ListingOutput`. `ConsoleOutput` writes to the terminal, while
//! `BufferedOutput` keeps everything in memory.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::config::OutputConfig;

/// Receiver for listing lines and recoverable-error warnings.
pub trait ListingOutput {
    fn line(&mut self, line: &str) -> io::Result<()>;

    fn warning(&mut self, message: &str) -> io::Result<()>;

    fn blank(&mut self) -> io::Result<()> {
        self.line("")
    }
}

/// Writes lines to stdout and warnings to stderr.
pub struct ConsoleOutput {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl ConsoleOutput {
    pub fn new(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(ColorChoice::Never),
            stderr: StandardStream::stderr(choice),
        }
    }
}

impl ListingOutput for ConsoleOutput {
    fn line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", line)
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(self.stderr, "{}", message)?;
        self.stderr.reset()?;
        writeln!(self.stderr)
    }
}

/// Collects lines and warnings in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferedOutput {
    lines: Vec<String>,
    warnings: Vec<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl ListingOutput for BufferedOutput {
    fn line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        self.warnings.push(message.to_string());
        Ok(())
    }
}
