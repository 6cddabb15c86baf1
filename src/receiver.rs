//! Theme receiver installed inside the target page
//!
//! On mount it announces itself with `PREVIEWCN_READY`. Afterwards every
//! inbound payload is classified; pings are answered with pongs, theme
//! messages go through the shared `StyleApplier`, and anything else is
//! dropped with a log line.

use serde_json::Value;
use tracing::{debug, info};

use crate::dom::{Document, StyleApplier, StyleRegistry};
use crate::logging::log_message_event;
use crate::protocol::{parse_value_graceful, Message};
use crate::transport::{MessageSink, WindowPort};

pub struct ThemeReceiver<D: Document> {
    document: D,
    applier: StyleApplier,
    port: WindowPort,
    listening: bool,
}

impl<D: Document> ThemeReceiver<D> {
    pub fn new(document: D, port: WindowPort) -> Self {
        Self::with_registry(document, port, StyleRegistry::receiver())
    }

    pub fn with_registry(document: D, port: WindowPort, registry: StyleRegistry) -> Self {
        ThemeReceiver {
            document,
            applier: StyleApplier::new(registry),
            port,
            listening: false,
        }
    }

    /// Start listening and tell the parent we exist
    ///
    /// Posting is a no-op when the page is not embedded.
    pub fn mount(&mut self) {
        self.listening = true;
        self.port.post_message(&Message::ready());
        info!(embedded = self.port.is_embedded(), "Theme receiver mounted");
    }

    /// Stop listening; anything queued or posted until the next mount is dropped
    pub fn unmount(&mut self) {
        self.listening = false;
        let dropped = self.port.drain().len();
        debug!(dropped, "Theme receiver unmounted");
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Handle one raw payload; returns true if the DOM changed
    pub fn handle_value(&mut self, value: Value) -> bool {
        if !self.listening {
            return false;
        }
        match parse_value_graceful(value).into_message() {
            Some(message) => self.handle_message(&message),
            None => false,
        }
    }

    pub fn handle_message(&mut self, message: &Message) -> bool {
        log_message_event("received", message.message_type());
        match message {
            Message::Ping {} => {
                self.port.post_message(&Message::pong());
                false
            }
            // Editor-bound messages; a receiver never acts on them
            Message::Ready {} | Message::Pong {} => false,
            _ => {
                debug!(message_type = message.message_type(), "Applying theme message");
                self.applier.apply_message(&mut self.document, message)
            }
        }
    }

    /// Handle everything queued on the port; returns how many changed the DOM
    pub fn pump(&mut self) -> usize {
        if !self.listening {
            // No listener registered: payloads are lost, not deferred
            let dropped = self.port.drain().len();
            if dropped > 0 {
                debug!(dropped, "Dropped payloads while unmounted");
            }
            return 0;
        }
        let mut applied = 0;
        for value in self.port.drain() {
            if self.handle_value(value) {
                applied += 1;
            }
        }
        applied
    }

    /// Remove every style this receiver injected
    pub fn clear_theme(&mut self) {
        self.applier.clear(&mut self.document);
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::transport::WindowChannel;
    use serde_json::json;

    fn mounted() -> (ThemeReceiver<MemoryDocument>, WindowPort) {
        let (editor, target) = WindowChannel::pair();
        let mut receiver = ThemeReceiver::new(MemoryDocument::new(), target);
        receiver.mount();
        (receiver, editor)
    }

    #[test]
    fn test_mount_announces_ready() {
        let (_receiver, mut editor) = mounted();
        assert_eq!(editor.try_recv_message(), Some(Message::ready()));
    }

    #[test]
    fn test_mount_top_level_is_silent() {
        let mut receiver = ThemeReceiver::new(MemoryDocument::new(), WindowPort::top_level());
        receiver.mount();
        assert!(receiver.is_listening());
    }

    #[test]
    fn test_ping_answered_without_dom_change() {
        let (mut receiver, mut editor) = mounted();
        editor.drain();

        editor.post_message(&Message::ping());
        assert_eq!(receiver.pump(), 0);
        assert_eq!(editor.try_recv_message(), Some(Message::pong()));
        assert_eq!(receiver.document(), &MemoryDocument::new());
    }

    #[test]
    fn test_apply_theme_sets_vars_and_class() {
        let (mut receiver, mut editor) = mounted();
        editor.post_value(json!({
            "type": "APPLY_THEME",
            "cssVars": {"primary": "oklch(0.5 0.2 250)", "radius": "1rem"},
            "darkMode": true
        }));
        assert_eq!(receiver.pump(), 1);

        let doc = receiver.document();
        assert_eq!(doc.root_property("--primary").as_deref(), Some("oklch(0.5 0.2 250)"));
        assert_eq!(doc.root_property("--radius").as_deref(), Some("1rem"));
        assert!(doc.has_root_class("dark"));
    }

    #[test]
    fn test_unknown_and_malformed_payloads_change_nothing() {
        let (mut receiver, mut editor) = mounted();
        editor.post_value(json!({"type": "SOMETHING_UNKNOWN", "cssVars": {"x": "y"}}));
        editor.post_value(json!({"cssVars": {}}));
        editor.post_value(json!({"type": "UPDATE_RADIUS"}));
        editor.post_value(json!(42));

        assert_eq!(receiver.pump(), 0);
        assert_eq!(receiver.document(), &MemoryDocument::new());
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let (mut receiver, _editor) = mounted();
        assert!(receiver.handle_value(json!({
            "type": "UPDATE_RADIUS",
            "radius": "0.75rem",
            "sentAt": 12345
        })));
        assert_eq!(
            receiver.document().root_property("--radius").as_deref(),
            Some("0.75rem")
        );
    }

    #[test]
    fn test_unmounted_receiver_ignores_messages() {
        let (mut receiver, mut editor) = mounted();
        receiver.unmount();
        editor.post_message(&Message::update_radius("1rem"));
        editor.post_message(&Message::ping());

        assert_eq!(receiver.pump(), 0);
        assert_eq!(receiver.document().root_property("--radius"), None);
        let replies = editor.drain();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0]["type"], "PREVIEWCN_READY");
    }

    #[test]
    fn test_messages_posted_while_unmounted_are_not_replayed_on_remount() {
        let (mut receiver, mut editor) = mounted();
        receiver.unmount();
        for _ in 0..5 {
            editor.post_message(&Message::ping());
        }
        editor.post_message(&Message::update_radius("9rem"));

        receiver.mount();
        assert_eq!(receiver.pump(), 0);
        assert_eq!(receiver.document().root_property("--radius"), None);

        let replies = editor.drain();
        assert_eq!(replies.len(), 2);
        assert!(replies.iter().all(|r| r["type"] == "PREVIEWCN_READY"));
    }

    #[test]
    fn test_clear_theme_removes_injected_styles() {
        let (mut receiver, _editor) = mounted();
        receiver.handle_message(&Message::update_radius("1rem"));
        receiver.handle_message(&Message::toggle_dark_mode(true));
        receiver.clear_theme();

        let doc = receiver.document();
        assert_eq!(doc.root_property("--radius"), None);
        assert!(!doc.has_root_class("dark"));
    }
}
