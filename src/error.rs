use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info, warn};

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,    // informational
    Warning, // recoverable, defaults used
    Error,   // operation failed
}

/// Domain-specific errors
///
/// None of these cross `update_config` or the receiver's message handler;
/// they are logged and turned into fallbacks at the call site.
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Storage unavailable at '{path}': {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file '{path}' is corrupt: {message}")]
    StorageFormat { path: PathBuf, message: String },

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidUrl(String),
}

impl PreviewError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Storage { .. } => ErrorSeverity::Info,
            Self::StorageFormat { .. } => ErrorSeverity::Warning,
            Self::Clipboard(_) => ErrorSeverity::Error,
            Self::Config(_) => ErrorSeverity::Warning,
            Self::InvalidUrl(_) => ErrorSeverity::Error,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Storage { .. } | Self::StorageFormat { .. } => {
                "Settings could not be saved; using defaults".to_string()
            }
            Self::Clipboard(msg) => format!("Could not copy to clipboard: {}", msg),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
            Self::InvalidUrl(msg) => msg.clone(),
        }
    }
}

impl PreviewError {
    /// Log at the level `severity()` calls for, tagged with the caller location
    #[track_caller]
    pub fn log(&self) {
        let caller = std::panic::Location::caller();
        let (file, line) = (caller.file(), caller.line());
        match self.severity() {
            ErrorSeverity::Info => info!(error = %self, file, line, "Recovered from error"),
            ErrorSeverity::Warning => warn!(error = %self, file, line, "Recovered from error"),
            ErrorSeverity::Error => error!(error = %self, file, line, "Operation failed"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PreviewError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use previewcn::error::ResultExt;
///
/// // Persistence failures never stop the editor
/// store.save().warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
