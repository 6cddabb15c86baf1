//! Structured JSONL logging plus human-readable stderr output.
//!
//! Dual output:
//! - **JSONL to file** (~/.previewcn/logs/previewcn.jsonl) - one JSON object per line
//! - **Compact to stderr** - for developers watching a session
//!
//! # Usage
//!
//! ```rust,ignore
//! use previewcn::logging;
//!
//! // Keep the guard alive for the duration of the program
//! let _guard = logging::init();
//!
//! tracing::info!(event_type = "session", action = "started", "Editor session started");
//! ```
//!
//! # JSONL Output Format
//!
//! ```json
//! {"timestamp":"2026-01-05T10:30:45.123Z","level":"INFO","target":"previewcn::editor","fields":{"message":"Receiver connected","message_type":"PREVIEWCN_PONG"}}
//! ```

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::editor::ConnectionStatus;

/// In-memory tail of recent log lines for UI display
static LOG_BUFFER: OnceLock<Mutex<VecDeque<String>>> = OnceLock::new();
const MAX_LOG_LINES: usize = 50;

const LOG_FILE_NAME: &str = "previewcn.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping it flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the dual-output logging system.
///
/// A second call (or a subscriber installed elsewhere, e.g. by a test
/// harness) leaves the existing subscriber in place.
pub fn init() -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }
    let log_path = log_dir.join(LOG_FILE_NAME);

    let (non_blocking_file, file_guard) = open_log_writer(&log_path);

    // Default to info, override via RUST_LOG
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    let compact_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(compact_layer)
        .try_init()
        .is_err()
    {
        eprintln!("[LOGGING] A global subscriber is already installed");
    }

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Append-mode file writer, or a sink when the file can't be opened
fn open_log_writer(log_path: &std::path::Path) -> (NonBlocking, WorkerGuard) {
    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => tracing_appender::non_blocking(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            tracing_appender::non_blocking(std::io::sink())
        }
    }
}

/// ~/.previewcn/logs/
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".previewcn").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("previewcn-logs"))
}

/// Path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

/// Category-tagged info line that is also kept in the recent-log buffer.
///
/// Prefer tracing macros with structured fields for everything else.
pub fn log(category: &str, message: &str) {
    add_to_buffer(category, message);
    tracing::info!(category = category, "{}", message);
}

fn add_to_buffer(category: &str, message: &str) {
    let buffer = LOG_BUFFER.get_or_init(|| Mutex::new(VecDeque::with_capacity(MAX_LOG_LINES)));
    let mut buf = buffer.lock();
    if buf.len() >= MAX_LOG_LINES {
        buf.pop_front();
    }
    buf.push_back(format!("[{}] {}", category, message));
}

/// Recent log lines, oldest first
pub fn get_recent_logs() -> Vec<String> {
    LOG_BUFFER
        .get()
        .map(|buffer| buffer.lock().iter().cloned().collect())
        .unwrap_or_default()
}

// =============================================================================
// STRUCTURED HELPERS
// =============================================================================

/// A protocol message crossed the window boundary
pub fn log_message_event(direction: &str, message_type: &str) {
    add_to_buffer("MESSAGE", &format!("{} {}", direction, message_type));
    tracing::debug!(
        event_type = "message",
        direction = direction,
        message_type = message_type,
        "Message {} {}", direction, message_type
    );
}

/// The status shown next to the preview changed
pub fn log_status_change(from: ConnectionStatus, to: ConnectionStatus) {
    if from == to {
        return;
    }
    add_to_buffer("STATUS", &format!("{} -> {}", from, to));
    tracing::info!(
        event_type = "connection_status",
        from = %from,
        to = %to,
        "Connection {} -> {}", from, to
    );
}
