//! End-to-end scenarios: editor session and receiver wired over a window channel

use std::time::{Duration, Instant};

use serde_json::json;

use crate::config::Settings;
use crate::devtools::DevtoolsPanel;
use crate::dom::{Document, MemoryDocument, StyleRegistry};
use crate::editor::{ConfigReducer, ConnectionStatus, EditorSession};
use crate::presets::ColorCatalog;
use crate::receiver::ThemeReceiver;
use crate::storage::MemoryStore;
use crate::theme::{ThemeConfig, ThemeConfigPatch};
use crate::transport::WindowChannel;

const STEP: Duration = Duration::from_millis(100);

struct Harness {
    session: EditorSession,
    receiver: ThemeReceiver<MemoryDocument>,
    t0: Instant,
}

impl Harness {
    fn loaded() -> Self {
        let (editor, target) = WindowChannel::pair();
        let mut session = EditorSession::new(Settings::default(), Box::new(MemoryStore::new()));
        session.attach_port(editor);

        let t0 = Instant::now();
        let mut receiver = ThemeReceiver::new(MemoryDocument::new(), target);
        receiver.mount();
        session.handle_iframe_load(t0);

        Harness {
            session,
            receiver,
            t0,
        }
    }

    /// Advance both sides from `from` to `to` in fixed steps
    fn run(&mut self, from: Duration, to: Duration) {
        let mut elapsed = from;
        while elapsed <= to {
            let now = self.t0 + elapsed;
            self.session.tick(now);
            self.receiver.pump();
            elapsed += STEP;
        }
    }
}

#[test]
fn test_heartbeat_converges_to_connected() {
    let mut h = Harness::loaded();
    h.run(Duration::ZERO, Duration::from_secs(10));
    assert_eq!(h.session.connection_status(), ConnectionStatus::Connected);
}

#[test]
fn test_silent_receiver_disconnects_within_interval_plus_timeout() {
    let settings = Settings::default();
    let mut h = Harness::loaded();
    h.run(Duration::ZERO, Duration::from_secs(4));
    assert_eq!(h.session.connection_status(), ConnectionStatus::Connected);

    // Last pong answered the probe sent at t=3s
    h.receiver.unmount();
    let last_pong = Duration::from_millis(3100);
    let deadline = last_pong + settings.ping_interval() + settings.pong_timeout();

    let mut elapsed = Duration::from_millis(4100);
    while elapsed <= deadline {
        h.session.tick(h.t0 + elapsed);
        h.receiver.pump();
        elapsed += STEP;
    }
    assert_eq!(h.session.connection_status(), ConnectionStatus::Disconnected);
}

#[test]
fn test_receiver_coming_back_reconnects() {
    let mut h = Harness::loaded();
    h.run(Duration::ZERO, Duration::from_secs(1));
    h.receiver.unmount();
    h.run(Duration::from_millis(1100), Duration::from_secs(8));
    assert_eq!(h.session.connection_status(), ConnectionStatus::Disconnected);

    h.receiver.mount();
    h.run(Duration::from_millis(8100), Duration::from_secs(12));
    assert_eq!(h.session.connection_status(), ConnectionStatus::Connected);
}

#[test]
fn test_color_preset_reaches_target_stylesheet() {
    let mut h = Harness::loaded();
    h.run(Duration::ZERO, Duration::from_millis(200));

    h.session.update_config(ThemeConfigPatch::new().color_preset("blue"));
    h.receiver.pump();

    assert_eq!(h.session.config().color_preset.as_deref(), Some("blue"));
    let blue = ColorCatalog::builtin().get("blue").unwrap();
    let css = h
        .receiver
        .document()
        .style_text("previewcn-theme-colors")
        .unwrap();
    assert!(css.contains(&format!("--primary: {};", blue.colors.light["primary"])));
    assert!(css.contains(&format!(".dark {{ --background: {};", blue.colors.dark["background"])));
}

#[test]
fn test_dark_mode_toggle_keeps_color_stylesheet() {
    let mut h = Harness::loaded();
    h.session.update_config(ThemeConfigPatch::new().color_preset("rose"));
    h.session.update_config(ThemeConfigPatch::new().dark_mode(true));
    h.receiver.pump();

    let doc = h.receiver.document();
    assert!(doc.has_root_class("dark"));
    assert!(!doc.has_root_class("light"));
    assert_eq!(doc.root_property("color-scheme").as_deref(), Some("dark"));
    assert!(doc.style_text("previewcn-theme-colors").is_some());
    assert_eq!(doc.root_property("--primary"), None);
}

#[test]
fn test_forged_font_url_is_ignored_by_receiver() {
    let (mut editor, target) = WindowChannel::pair();
    let mut receiver = ThemeReceiver::new(MemoryDocument::new(), target);
    receiver.mount();

    editor.post_value(json!({
        "type": "UPDATE_FONT",
        "fontId": "evil",
        "fontFamily": "Evil, sans-serif",
        "googleFontsUrl": "https://evil.example/x.css"
    }));
    assert_eq!(receiver.pump(), 0);
    assert_eq!(receiver.document(), &MemoryDocument::new());
}

#[test]
fn test_unknown_message_between_known_ones() {
    let (mut editor, target) = WindowChannel::pair();
    let mut receiver = ThemeReceiver::new(MemoryDocument::new(), target);
    receiver.mount();

    editor.post_value(json!({"type": "UPDATE_RADIUS", "radius": "0.3rem"}));
    editor.post_value(json!({"type": "SOMETHING_UNKNOWN"}));
    editor.post_value(json!({"type": "UPDATE_RADIUS", "radius": "1rem"}));

    assert_eq!(receiver.pump(), 2);
    assert_eq!(receiver.document().root_property("--radius").as_deref(), Some("1rem"));
}

#[test]
fn test_devtools_and_receiver_produce_the_same_page() {
    let config = ThemeConfig {
        color_preset: Some("orange".into()),
        radius: Some("0.75rem".into()),
        dark_mode: Some(true),
        font: Some("outfit".into()),
    };

    let mut panel = DevtoolsPanel::new(MemoryDocument::new(), Box::new(MemoryStore::new()))
        .with_registry(StyleRegistry::receiver());
    panel.apply_theme(&config);

    let (mut editor, target) = WindowChannel::pair();
    let mut receiver = ThemeReceiver::new(MemoryDocument::new(), target);
    receiver.mount();
    let mut reducer = ConfigReducer::new();
    for patch in [
        ThemeConfigPatch::new().color_preset("orange"),
        ThemeConfigPatch::new().radius("0.75rem"),
        ThemeConfigPatch::new().dark_mode(true),
        ThemeConfigPatch::new().font("outfit"),
    ] {
        reducer.update_config(patch, &mut editor);
    }
    receiver.pump();

    assert_eq!(panel.document(), receiver.document());
}

#[test]
fn test_url_change_drops_connection_until_reload() {
    let mut h = Harness::loaded();
    h.run(Duration::ZERO, Duration::from_millis(500));
    assert_eq!(h.session.connection_status(), ConnectionStatus::Connected);

    h.session.set_input_url("http://localhost:3001");
    assert!(h.session.apply_url());
    assert_eq!(h.session.connection_status(), ConnectionStatus::Disconnected);

    // No probes while the new frame is loading
    h.run(Duration::from_millis(600), Duration::from_secs(5));
    assert_eq!(h.session.connection_status(), ConnectionStatus::Disconnected);

    h.session.handle_iframe_load(h.t0 + Duration::from_millis(5100));
    h.run(Duration::from_millis(5100), Duration::from_secs(6));
    assert_eq!(h.session.connection_status(), ConnectionStatus::Connected);
}
