//! Logging hub for the Glitch viewer
//!
//! Everything the viewer reports (shader diagnostics, GL object lifetimes,
//! frame setup) goes through the [`Logger`] installed on the
//! [`Engine`](crate::glitch::Engine). The default logger prints colored,
//! timestamped lines to stderr. Replace it to capture output in a UI or a test.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Destination for log entries
///
/// # Example
///
/// ```no_run
/// use glitch_viewer::glitch::log::{Logger, LogEntry};
///
/// struct PanelLogger;
///
/// impl Logger for PanelLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Push into an on-screen console...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Handle one entry
    fn log(&self, entry: &LogEntry);
}

/// One log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Creation time
    pub timestamp: SystemTime,

    /// Emitting component (e.g. "glitch::ShaderProgram", "glitch::gl")
    pub source: String,

    /// Message text
    pub message: String,

    /// Source file, only set for ERROR entries
    pub file: Option<&'static str>,

    /// Source line, only set for ERROR entries
    pub line: Option<u32>,
}

/// Log severity levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    /// Per-frame chatter
    Trace,
    /// Object creation/destruction, state transitions
    Debug,
    /// Milestones (program linked, scene mode chosen)
    Info,
    /// Recoverable oddities
    Warn,
    /// Failures, reported with file:line
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by [`DefaultLogger`]
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    fn colorize(&self) -> ColoredString {
        let label = self.label();
        match self {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        }
    }
}

impl LogEntry {
    /// Render the entry without colors:
    /// `[timestamp] [SEVERITY] [source] message (file:line)`
    pub fn format_plain(&self) -> String {
        let mut line = format!(
            "[{}] [{}] [{}] {}",
            format_timestamp(self.timestamp),
            self.severity.label(),
            self.source,
            self.message
        );
        if let (Some(file), Some(number)) = (self.file, self.line) {
            line.push_str(&format!(" ({}:{})", file, number));
        }
        line
    }
}

/// Local time as `YYYY-MM-DD HH:MM:SS.mmm`
pub fn format_timestamp(timestamp: SystemTime) -> String {
    let datetime: DateTime<Local> = timestamp.into();
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Colored console logger, writes to stderr
///
/// Shader info logs span several lines; continuation lines are indented
/// under the header so multi-line diagnostics stay readable.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let mut lines = entry.message.lines();
        let first = lines.next().unwrap_or_default();

        let location = match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(" ({}:{})", file, line).bright_black().to_string(),
            _ => String::new(),
        };

        eprintln!(
            "[{}] [{}] [{}] {}{}",
            format_timestamp(entry.timestamp),
            entry.severity.colorize(),
            entry.source.bright_blue(),
            first,
            location
        );
        for rest in lines {
            eprintln!("    {}", rest);
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
#[macro_export]
macro_rules! viewer_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::glitch::Engine::log(
            $crate::glitch::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! viewer_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::glitch::Engine::log(
            $crate::glitch::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
///
/// # Example
///
/// ```no_run
/// # use glitch_viewer::viewer_info;
/// viewer_info!("glitch::ShaderProgram", "Program {} linked", 3);
/// ```
#[macro_export]
macro_rules! viewer_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::glitch::Engine::log(
            $crate::glitch::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! viewer_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::glitch::Engine::log(
            $crate::glitch::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! viewer_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::glitch::Engine::log_detailed(
            $crate::glitch::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
