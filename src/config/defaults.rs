//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// How often the editor pings the receiver (ms)
pub const DEFAULT_PING_INTERVAL_MS: u64 = 3000;

/// How long to wait for a pong before marking the target disconnected (ms)
pub const DEFAULT_PONG_TIMEOUT_MS: u64 = 2000;

/// How long the "copied" flag stays set after a CSS export (ms)
pub const DEFAULT_COPIED_RESET_MS: u64 = 2000;

/// Target loaded when no URL has been stored yet
pub const DEFAULT_TARGET_URL: &str = crate::storage::DEFAULT_TARGET_URL;

/// Stylesheet URL prefix the receiver accepts for fonts
pub const DEFAULT_TRUSTED_FONT_HOST: &str = crate::dom::TRUSTED_FONT_HOST;
