//! Settings loading from file system

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::types::Settings;
use crate::error::{PreviewError, ResultExt};

/// `~/.previewcn/settings.json`
pub fn settings_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.previewcn/settings.json").as_ref())
}

/// Load settings from the default location
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`
///
/// Returns `Settings::default()` if the file is missing, unreadable, or invalid.
/// Zero intervals are rejected field by field so a typo can't disable the heartbeat.
#[instrument(name = "load_settings", skip_all, fields(path = %path.display()))]
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        info!("Settings file not found, using defaults");
        return Settings::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Failed to read settings file, using defaults");
            return Settings::default();
        }
    };

    let parsed = serde_json::from_str::<Settings>(&content)
        .map_err(|e| PreviewError::Config(format!("{}: {}", path.display(), e)))
        .warn_on_err();
    let Some(mut settings) = parsed else {
        warn!("Failed to parse settings JSON, using defaults");
        return Settings::default();
    };

    let defaults = Settings::default();
    if settings.ping_interval_ms == 0 {
        warn!("pingIntervalMs must be positive, using default");
        settings.ping_interval_ms = defaults.ping_interval_ms;
    }
    if settings.pong_timeout_ms == 0 {
        warn!("pongTimeoutMs must be positive, using default");
        settings.pong_timeout_ms = defaults.pong_timeout_ms;
    }
    if !settings.trusted_font_host.starts_with("https://") {
        warn!(
            trusted_font_host = %settings.trusted_font_host,
            "trustedFontHost must be an https:// prefix, using default"
        );
        settings.trusted_font_host = defaults.trusted_font_host;
    }

    info!("Successfully loaded settings");
    settings
}
