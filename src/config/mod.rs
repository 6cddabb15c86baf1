//! Configuration module - Editor and receiver settings
//!
//! This module provides functionality for:
//! - Loading settings from ~/.previewcn/settings.json
//! - Default values for all settings
//! - Type definitions for the settings structure
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - `Settings` struct definition
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_COPIED_RESET_MS, DEFAULT_PING_INTERVAL_MS, DEFAULT_PONG_TIMEOUT_MS,
    DEFAULT_TARGET_URL, DEFAULT_TRUSTED_FONT_HOST,
};

pub use types::Settings;

pub use loader::{load_settings, load_settings_from, settings_path};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
