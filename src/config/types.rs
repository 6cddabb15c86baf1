//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::*;

/// Runtime settings for the editor session and the receiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Heartbeat probe cadence (default: 3000)
    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,
    /// Liveness deadline after each probe (default: 2000)
    #[serde(default = "default_pong_timeout_ms")]
    pub pong_timeout_ms: u64,
    /// Auto-reset delay for the "copied" flag (default: 2000)
    #[serde(default = "default_copied_reset_ms")]
    pub copied_reset_ms: u64,
    /// Target URL used when storage has none (default: "/preview")
    #[serde(default = "default_target_url")]
    pub default_target_url: String,
    /// Only font stylesheets under this prefix are injected
    #[serde(default = "default_trusted_font_host")]
    pub trusted_font_host: String,
    /// Where the key-value store lives (None = ~/.previewcn/storage.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
}

fn default_ping_interval_ms() -> u64 {
    DEFAULT_PING_INTERVAL_MS
}
fn default_pong_timeout_ms() -> u64 {
    DEFAULT_PONG_TIMEOUT_MS
}
fn default_copied_reset_ms() -> u64 {
    DEFAULT_COPIED_RESET_MS
}
fn default_target_url() -> String {
    DEFAULT_TARGET_URL.to_string()
}
fn default_trusted_font_host() -> String {
    DEFAULT_TRUSTED_FONT_HOST.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ping_interval_ms: DEFAULT_PING_INTERVAL_MS,
            pong_timeout_ms: DEFAULT_PONG_TIMEOUT_MS,
            copied_reset_ms: DEFAULT_COPIED_RESET_MS,
            default_target_url: default_target_url(),
            trusted_font_host: default_trusted_font_host(),
            storage_path: None,
        }
    }
}

impl Settings {
    pub fn ping_interval(&self) -> Duration {
        Duration::from_millis(self.ping_interval_ms)
    }

    pub fn pong_timeout(&self) -> Duration {
        Duration::from_millis(self.pong_timeout_ms)
    }

    pub fn copied_reset(&self) -> Duration {
        Duration::from_millis(self.copied_reset_ms)
    }

    /// Storage path with `~` expanded
    pub fn resolved_storage_path(&self) -> Option<PathBuf> {
        self.storage_path
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
    }
}
