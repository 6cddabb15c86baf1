//! Editor session: the state a theme editor UI reads and the handlers it calls
//!
//! Owns the config reducer, the connection tracker, the target URL state and
//! the transient "copied" flag. The host drives it with frame lifecycle
//! events, inbound payloads and `tick(now)`.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::Settings;
use crate::logging::{log_message_event, log_status_change};
use crate::protocol::{parse_value_graceful, Message};
use crate::storage::{get_stored_url, set_stored_url, JsonFileStore, KeyValueStore};
use crate::theme::{export_css, ThemeConfig, ThemeConfigPatch};
use crate::transport::{MessageSink, WindowPort};

use super::clipboard::Clipboard;
use super::reducer::ConfigReducer;
use super::tracker::{ConnectionStatus, ConnectionTracker};
use super::url::validate_url;

/// Shown when the frame fails to load
pub const IFRAME_LOAD_ERROR: &str = "Failed to load the target URL. Make sure the app is running.";

/// Remediation shown with the `blocked` status
pub const BLOCKED_GUIDANCE: &str = r#"Your target app needs to allow iframe embedding. Add this to your Next.js config:

// next.config.js
async headers() {
  return [{
    source: '/:path*',
    headers: [
      {
        key: 'Content-Security-Policy',
        value: "frame-ancestors 'self' http://localhost:*"
      }
    ]
  }];
}

Also add the ThemeReceiver component to receive theme updates."#;

pub struct EditorSession {
    reducer: ConfigReducer,
    tracker: ConnectionTracker,
    port: WindowPort,
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    target_url: String,
    input_url: String,
    url_error: Option<String>,
    iframe_error: Option<String>,
    copied_at: Option<Instant>,
}

impl EditorSession {
    /// Session backed by the JSON file store at the configured `storagePath`
    pub fn open(settings: Settings) -> Self {
        let store = JsonFileStore::for_settings(&settings);
        Self::new(settings, Box::new(store))
    }

    /// Start on the stored target URL (or the configured default)
    pub fn new(settings: Settings, store: Box<dyn KeyValueStore>) -> Self {
        let initial = get_stored_url(store.as_ref(), &settings.default_target_url);
        Self::with_initial_url(settings, store, &initial)
    }

    /// Start on `initial_url`, ignoring storage
    pub fn with_initial_url(
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        initial_url: &str,
    ) -> Self {
        let mut tracker = ConnectionTracker::new(settings.ping_interval(), settings.pong_timeout());
        tracker.set_target_url(initial_url);
        EditorSession {
            reducer: ConfigReducer::new(),
            tracker,
            port: WindowPort::top_level(),
            store,
            settings,
            target_url: initial_url.to_string(),
            input_url: initial_url.to_string(),
            url_error: None,
            iframe_error: None,
            copied_at: None,
        }
    }

    /// Wire up the frame's window; any previous frame is detached
    pub fn attach_port(&mut self, port: WindowPort) {
        self.port.detach();
        self.port = port;
    }

    pub fn set_on_theme_change(&mut self, hook: impl FnMut(&ThemeConfig) + 'static) {
        self.reducer.set_on_theme_change(hook);
    }

    pub fn config(&self) -> &ThemeConfig {
        self.reducer.config()
    }

    pub fn update_config(&mut self, patch: ThemeConfigPatch) {
        self.reducer.update_config(patch, &mut self.port);
    }

    /// Replace the config and push it as one full theme
    pub fn initialize(&mut self, config: ThemeConfig) {
        self.reducer.initialize(config, &mut self.port);
    }

    // --- URL ---

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn input_url(&self) -> &str {
        &self.input_url
    }

    pub fn set_input_url(&mut self, url: impl Into<String>) {
        self.input_url = url.into();
    }

    pub fn url_error(&self) -> Option<&str> {
        self.url_error.as_deref()
    }

    /// Validate the input and, if it passes, load it as the new target
    #[instrument(skip_all)]
    pub fn apply_url(&mut self) -> bool {
        if let Err(e) = validate_url(&self.input_url) {
            debug!(error = %e, "Rejected target URL");
            self.url_error = Some(e.user_message());
            return false;
        }

        self.url_error = None;
        self.iframe_error = None;
        info!(url = %self.input_url, "Target URL applied");
        let before = self.connection_status();
        self.target_url = self.input_url.clone();
        self.tracker.set_target_url(&self.target_url);
        log_status_change(before, self.connection_status());
        set_stored_url(self.store.as_mut(), &self.target_url);
        true
    }

    // --- frame lifecycle ---

    pub fn is_iframe_loading(&self) -> bool {
        self.tracker.is_loading()
    }

    pub fn iframe_error(&self) -> Option<&str> {
        self.iframe_error.as_deref()
    }

    pub fn handle_iframe_load(&mut self, now: Instant) {
        let before = self.connection_status();
        self.iframe_error = None;
        self.tracker.surface_loaded(now);
        log_status_change(before, self.connection_status());
    }

    pub fn handle_iframe_error(&mut self) {
        warn!(target_url = %self.target_url, "Target frame failed to load");
        let before = self.connection_status();
        self.iframe_error = Some(IFRAME_LOAD_ERROR.to_string());
        self.tracker.surface_failed();
        log_status_change(before, self.connection_status());
    }

    /// Frame removed (panel closed); pending probes are cancelled
    pub fn handle_iframe_teardown(&mut self) {
        let before = self.connection_status();
        self.tracker.surface_torn_down();
        log_status_change(before, self.connection_status());
        self.port.detach();
    }

    // --- messaging ---

    /// One inbound payload from the frame; unknown shapes are ignored
    pub fn handle_incoming(&mut self, value: Value, now: Instant) {
        if let Some(message) = parse_value_graceful(value).into_message() {
            self.handle_message(&message, now);
        }
    }

    pub fn handle_message(&mut self, message: &Message, now: Instant) {
        log_message_event("received", message.message_type());
        let before = self.connection_status();
        self.tracker.handle_message(message, now);
        log_status_change(before, self.connection_status());
        // A freshly (re)loaded receiver starts unthemed
        if matches!(message, Message::Ready {}) && !self.reducer.config().is_empty() {
            debug!("Receiver announced itself, resending current theme");
            let full = self.reducer.full_theme_message();
            self.port.post_message(&full);
        }
    }

    /// Handle everything the frame has posted so far
    pub fn pump(&mut self, now: Instant) {
        for value in self.port.drain() {
            self.handle_incoming(value, now);
        }
    }

    /// Drain inbound messages, advance the heartbeat, expire the copied flag
    pub fn tick(&mut self, now: Instant) {
        self.pump(now);
        let before = self.connection_status();
        self.tracker.tick(now, &mut self.port);
        log_status_change(before, self.connection_status());
        if self
            .copied_at
            .is_some_and(|at| now.saturating_duration_since(at) >= self.settings.copied_reset())
        {
            self.copied_at = None;
        }
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.tracker.status()
    }

    /// Remediation text while the target refuses to be framed
    pub fn blocked_guidance(&self) -> Option<&'static str> {
        (self.connection_status() == ConnectionStatus::Blocked).then_some(BLOCKED_GUIDANCE)
    }

    // --- export ---

    pub fn export_css(&self) -> Option<String> {
        export_css(self.reducer.config(), &self.reducer.presets().colors)
    }

    pub fn copied(&self) -> bool {
        self.copied_at.is_some()
    }

    /// Copy the theme CSS; a no-op while there is nothing to export
    pub fn handle_copy_css(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> bool {
        let Some(css) = self.export_css().filter(|css| !css.trim().is_empty()) else {
            debug!("Nothing to export yet");
            return false;
        };
        if let Err(e) = clipboard.write_text(&css) {
            e.log();
            return false;
        }
        // Restarts the reset window on repeated copies
        self.copied_at = Some(now);
        true
    }
}
