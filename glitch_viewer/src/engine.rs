/// Glitch viewer Engine - process-wide logging hub
///
/// The viewer keeps no global scene state: the camera, frame timing and
/// effect toggles live in [`ViewerState`](crate::state::ViewerState), owned by
/// the render loop. The one shared slot is the logger, so any component
/// (including backend crates) can report through the same sink.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger slot (initialized with DefaultLogger on first use)
static LOGGER: OnceLock<RwLock<LoggerSlot>> = OnceLock::new();

/// Installed logger and the minimum severity it receives
struct LoggerSlot {
    logger: Box<dyn Logger>,
    min_severity: LogSeverity,
}

impl LoggerSlot {
    fn new() -> Self {
        Self {
            logger: Box::new(DefaultLogger),
            min_severity: default_min_severity(),
        }
    }
}

/// Debug builds show DEBUG and above, release builds INFO and above
fn default_min_severity() -> LogSeverity {
    if cfg!(debug_assertions) {
        LogSeverity::Debug
    } else {
        LogSeverity::Info
    }
}

fn slot() -> &'static RwLock<LoggerSlot> {
    LOGGER.get_or_init(|| RwLock::new(LoggerSlot::new()))
}

// ===== PUBLIC API =====

/// Logging facade shared by every viewer component
///
/// # Example
///
/// ```no_run
/// use glitch_viewer::glitch::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct Quiet;
/// impl Logger for Quiet {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// Engine::set_logger(Quiet);
/// Engine::set_min_severity(LogSeverity::Warn);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the current logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = slot().write() {
            lock.logger = Box::new(logger);
        }
    }

    /// Restore [`DefaultLogger`] and the default severity threshold
    pub fn reset_logger() {
        if let Ok(mut lock) = slot().write() {
            *lock = LoggerSlot::new();
        }
    }

    /// Drop every entry below `severity`
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut lock) = slot().write() {
            lock.min_severity = severity;
        }
    }

    /// Current severity threshold
    pub fn min_severity() -> LogSeverity {
        slot()
            .read()
            .map(|lock| lock.min_severity)
            .unwrap_or_else(|_| default_min_severity())
    }

    /// Log without file:line information
    ///
    /// Used by `viewer_info!`, `viewer_warn!`, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Log with file:line information
    ///
    /// Used by `viewer_error!` and `viewer_err!`.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if let Ok(lock) = slot().read() {
            if severity < lock.min_severity {
                return;
            }
            lock.logger.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
