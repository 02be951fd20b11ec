//! Console output
//!
//! Commands write through an [`Output`] with one of four semantic levels
//! (info, success, warning, error) or plain text. The console
//! implementation renders levels with colors; the buffered one records
//! them for inspection.

use colored::Colorize;
use std::io::Write;

/// Semantic level of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Info,
    Success,
    Warning,
    Error,
}

/// Destination for command output
pub trait Output {
    /// Write a message, optionally followed by a newline
    fn write(&mut self, message: &str, style: Style, newline: bool);
}

/// Level helpers available on every [`Output`]
///
/// The `*_inline` variants leave the cursor on the same line.
pub trait Printer: Output {
    fn line(&mut self, message: &str) {
        self.write(message, Style::Plain, true);
    }

    fn info(&mut self, message: &str) {
        self.write(message, Style::Info, true);
    }

    fn success(&mut self, message: &str) {
        self.write(message, Style::Success, true);
    }

    fn warning(&mut self, message: &str) {
        self.write(message, Style::Warning, true);
    }

    fn error(&mut self, message: &str) {
        self.write(message, Style::Error, true);
    }

    fn line_inline(&mut self, message: &str) {
        self.write(message, Style::Plain, false);
    }

    fn info_inline(&mut self, message: &str) {
        self.write(message, Style::Info, false);
    }

    fn success_inline(&mut self, message: &str) {
        self.write(message, Style::Success, false);
    }

    fn warning_inline(&mut self, message: &str) {
        self.write(message, Style::Warning, false);
    }

    fn error_inline(&mut self, message: &str) {
        self.write(message, Style::Error, false);
    }
}

impl<T: Output + ?Sized> Printer for T {}

/// Colored terminal output; errors go to stderr
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn new() -> Self {
        Self
    }

    /// Enable or disable colors for the whole process
    pub fn set_colors(enabled: bool) {
        colored::control::set_override(enabled);
    }

    fn render(message: &str, style: Style) -> String {
        match style {
            Style::Plain => message.to_string(),
            Style::Info => message.cyan().to_string(),
            Style::Success => message.green().to_string(),
            Style::Warning => message.yellow().to_string(),
            Style::Error => message.white().on_red().to_string(),
        }
    }
}

impl Output for ConsoleOutput {
    fn write(&mut self, message: &str, style: Style, newline: bool) {
        let rendered = Self::render(message, style);
        let end = if newline { "\n" } else { "" };

        // Broken pipes are not worth failing a command over
        let _ = match style {
            Style::Error => write!(std::io::stderr().lock(), "{}{}", rendered, end),
            _ => write!(std::io::stdout().lock(), "{}{}", rendered, end),
        };
    }
}

/// Output captured in memory
#[derive(Debug, Default, Clone)]
pub struct BufferedOutput {
    entries: Vec<(Style, String)>,
    buffer: String,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message written, with its level
    pub fn entries(&self) -> &[(Style, String)] {
        &self.entries
    }

    /// Messages written with the given level
    pub fn messages(&self, style: Style) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(s, _)| *s == style)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    /// Everything written, as it would appear on a terminal without colors
    pub fn contents(&self) -> &str {
        &self.buffer
    }
}

impl Output for BufferedOutput {
    fn write(&mut self, message: &str, style: Style, newline: bool) {
        self.entries.push((style, message.to_string()));
        self.buffer.push_str(message);
        if newline {
            self.buffer.push('\n');
        }
    }
}
