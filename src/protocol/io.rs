//! Protocol I/O for message parsing and serialization
//!
//! This module provides:
//! - `parse_value_graceful` for classifying a structured-clone payload
//! - `parse_message` / `parse_message_graceful` for JSON text
//! - `message_to_value` for the outbound side
//! - `JsonlReader` for replaying captured message streams

use std::io::{BufRead, BufReader, Read};
use tracing::{debug, warn};

use super::message::Message;
use crate::error::ResultExt;

/// Maximum length for raw JSON in logs (prevents huge variable maps in logs)
const MAX_RAW_LOG_PREVIEW: usize = 200;

/// Get a truncated preview of raw JSON for logging
pub fn log_preview(raw: &str) -> (&str, usize) {
    let len = raw.len();
    if len > MAX_RAW_LOG_PREVIEW {
        let mut end = MAX_RAW_LOG_PREVIEW;
        while !raw.is_char_boundary(end) {
            end -= 1;
        }
        (&raw[..end], len)
    } else {
        (raw, len)
    }
}

/// Parse a single message from JSON text, failing on anything unrecognized
pub fn parse_message(line: &str) -> Result<Message, serde_json::Error> {
    serde_json::from_str(line).map_err(|e| {
        let (preview, raw_len) = log_preview(line);
        warn!(raw_preview = %preview, raw_len, error = %e, "Failed to parse protocol message");
        e
    })
}

/// Result type for graceful message parsing
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed a known message type
    Ok(Message),
    /// Payload is not an object with a string "type" field
    MissingType {
        /// Truncated raw JSON for debugging
        raw: String,
    },
    /// Valid payload with a "type" we don't recognize
    UnknownType {
        message_type: String,
        raw: String,
    },
    /// Known message type but invalid payload (wrong field types, missing required fields)
    InvalidPayload {
        message_type: String,
        error: String,
        raw: String,
    },
    /// JSON parsing failed entirely (syntax error)
    ParseError(serde_json::Error),
}

impl ParseResult {
    /// Collapse to the dispatchable message, logging why anything else was dropped
    pub fn into_message(self) -> Option<Message> {
        match self {
            ParseResult::Ok(msg) => Some(msg),
            ParseResult::MissingType { raw } => {
                debug!(raw_preview = %raw, "Ignoring payload without a 'type' field");
                None
            }
            ParseResult::UnknownType { message_type, raw } => {
                debug!(
                    message_type = %message_type,
                    raw_preview = %raw,
                    "Ignoring unknown message type"
                );
                None
            }
            ParseResult::InvalidPayload {
                message_type,
                error,
                raw,
            } => {
                warn!(
                    message_type = %message_type,
                    error = %error,
                    raw_preview = %raw,
                    "Ignoring message with invalid payload"
                );
                None
            }
            ParseResult::ParseError(e) => {
                warn!(error = %e, "Ignoring malformed JSON message");
                None
            }
        }
    }
}

/// Classify an already-decoded payload (the structured-clone path)
///
/// # Classification Logic
/// - No string "type" field → `MissingType`
/// - Unknown type value → `UnknownType`
/// - Known type with invalid payload → `InvalidPayload`
///
/// Never logs; callers decide how loud a dropped payload should be.
pub fn parse_value_graceful(value: serde_json::Value) -> ParseResult {
    let raw = value.to_string();
    let (preview, _) = log_preview(&raw);
    let preview = preview.to_string();

    let msg_type: String = match value.get("type").and_then(|t| t.as_str()) {
        Some(t) => t.to_string(),
        None => return ParseResult::MissingType { raw: preview },
    };

    match serde_json::from_value::<Message>(value) {
        Ok(msg) => ParseResult::Ok(msg),
        Err(e) => {
            let error_str = e.to_string();
            if error_str.contains("unknown variant") {
                ParseResult::UnknownType {
                    message_type: msg_type,
                    raw: preview,
                }
            } else {
                ParseResult::InvalidPayload {
                    message_type: msg_type,
                    error: error_str,
                    raw: preview,
                }
            }
        }
    }
}

/// Parse JSON text with graceful handling of unknown types
pub fn parse_message_graceful(line: &str) -> ParseResult {
    match serde_json::from_str::<serde_json::Value>(line) {
        Ok(value) => parse_value_graceful(value),
        Err(e) => ParseResult::ParseError(e),
    }
}

/// Convert a message into the structured-clone value posted across windows
pub fn message_to_value(msg: &Message) -> serde_json::Value {
    // Every variant is a flat record of strings, bools and string maps
    serde_json::to_value(msg)
        .log_err()
        .unwrap_or(serde_json::Value::Null)
}

/// JSONL reader for replaying captured traffic
///
/// Uses a reusable line buffer to avoid allocating a new String per line.
pub struct JsonlReader<R: Read> {
    reader: BufReader<R>,
    line_buffer: String,
}

impl<R: Read> JsonlReader<R> {
    pub fn new(reader: R) -> Self {
        JsonlReader {
            reader: BufReader::new(reader),
            line_buffer: String::with_capacity(1024),
        }
    }

    /// Read the next raw payload, skipping blank lines and malformed JSON
    ///
    /// Unknown message types are returned as values so the consumer applies
    /// its own ignore policy.
    pub fn next_value(&mut self) -> Result<Option<serde_json::Value>, std::io::Error> {
        loop {
            self.line_buffer.clear();
            if self.reader.read_line(&mut self.line_buffer)? == 0 {
                debug!("Reached end of JSONL stream");
                return Ok(None);
            }

            let trimmed = self.line_buffer.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<serde_json::Value>(trimmed) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    let (preview, raw_len) = log_preview(trimmed);
                    warn!(
                        error = %e,
                        raw_preview = %preview,
                        raw_len,
                        "Skipping malformed JSON line"
                    );
                }
            }
        }
    }

    /// Read the next known message, skipping everything that doesn't classify
    pub fn next_message_graceful(&mut self) -> Result<Option<Message>, std::io::Error> {
        while let Some(value) = self.next_value()? {
            if let Some(msg) = parse_value_graceful(value).into_message() {
                return Ok(Some(msg));
            }
        }
        Ok(None)
    }
}
