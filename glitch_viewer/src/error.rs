//! Error types for the Glitch viewer
//!
//! Shader lifecycle failures have dedicated variants so callers (UI,
//! test harnesses) can tell an unreadable file from a broken source.
//! Device-level failures are reported as `BackendError`.

use std::fmt;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Glitch viewer errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A shader source file could not be opened or read
    ShaderSourceUnreadable(String),

    /// A stage failed to compile or the program failed to link.
    /// Carries the combined diagnostic log.
    ShaderCompileOrLinkFailed(String),

    /// The program is not in a state that allows the requested call
    ProgramUnavailable(String),

    /// Backend-specific error (OpenGL, mock device, ...)
    BackendError(String),

    /// Initialization failed (context, device, subsystems)
    InitializationFailed(String),
}

impl Error {
    /// Diagnostic text attached to a compile/link failure, if any
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Error::ShaderCompileOrLinkFailed(log) => Some(log),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShaderSourceUnreadable(msg) => write!(f, "Shader source unreadable: {}", msg),
            Error::ShaderCompileOrLinkFailed(log) => write!(f, "Shader compile/link failed:\n{}", log),
            Error::ProgramUnavailable(msg) => write!(f, "Shader program unavailable: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR and build an `Error::BackendError` with the same message
///
/// # Example
///
/// ```no_run
/// # use glitch_viewer::viewer_err;
/// let err = viewer_err!("glitch::gl", "Failed to create program: {}", "out of handles");
/// ```
#[macro_export]
macro_rules! viewer_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::glitch::Engine::log_detailed(
            $crate::glitch::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::glitch::Error::BackendError(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
