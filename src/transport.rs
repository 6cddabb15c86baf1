//! Cross-window message channel
//!
//! Models the postMessage channel between the editor window and the target
//! frame: payloads are structured-clone values (`serde_json::Value`), delivery
//! is FIFO per sender, and posting from a window that has no peer (the
//! target is the top-level document, or the frame was torn down) is a silent
//! no-op.
//!
//! # Example
//!
//! ```rust
//! use previewcn::protocol::Message;
//! use previewcn::transport::{MessageSink, WindowChannel};
//!
//! let (mut editor, mut target) = WindowChannel::pair();
//! editor.post_message(&Message::ping());
//! assert_eq!(target.try_recv_message(), Some(Message::ping()));
//! ```

use async_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::protocol::{message_to_value, parse_value_graceful, Message};

/// Anything a message can be posted to
pub trait MessageSink {
    fn post_message(&mut self, message: &Message);
}

/// Collects messages in order (used by tests and dry runs)
impl MessageSink for Vec<Message> {
    fn post_message(&mut self, message: &Message) {
        self.push(message.clone());
    }
}

/// Builder for connected window ports
pub struct WindowChannel;

impl WindowChannel {
    /// Two ports wired to each other: (editor side, target side)
    pub fn pair() -> (WindowPort, WindowPort) {
        let (editor_tx, editor_rx) = unbounded();
        let (target_tx, target_rx) = unbounded();
        (
            WindowPort {
                peer: Some(target_tx),
                inbox: editor_rx,
            },
            WindowPort {
                peer: Some(editor_tx),
                inbox: target_rx,
            },
        )
    }
}

/// One window's end of the channel
#[derive(Debug)]
pub struct WindowPort {
    peer: Option<Sender<serde_json::Value>>,
    inbox: Receiver<serde_json::Value>,
}

impl WindowPort {
    /// A port for a top-level window: nothing to post to, nothing arrives
    pub fn top_level() -> Self {
        let (_tx, rx) = unbounded();
        WindowPort {
            peer: None,
            inbox: rx,
        }
    }

    /// True while a peer window is attached and still listening
    pub fn is_embedded(&self) -> bool {
        self.peer.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Post a raw structured-clone payload (any shape, including unknown tags)
    pub fn post_value(&mut self, value: serde_json::Value) {
        match &self.peer {
            Some(tx) => {
                if tx.try_send(value).is_err() {
                    debug!("Peer window is gone, dropping message");
                }
            }
            None => debug!("Not embedded, dropping message"),
        }
    }

    /// Next raw payload, if one is queued
    pub fn try_recv(&mut self) -> Option<serde_json::Value> {
        self.inbox.try_recv().ok()
    }

    /// Next payload that classifies as a known message; others are dropped
    pub fn try_recv_message(&mut self) -> Option<Message> {
        while let Some(value) = self.try_recv() {
            if let Some(msg) = parse_value_graceful(value).into_message() {
                return Some(msg);
            }
        }
        None
    }

    /// Drain everything currently queued
    pub fn drain(&mut self) -> Vec<serde_json::Value> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Detach from the peer (frame torn down); later posts are no-ops
    pub fn detach(&mut self) {
        if let Some(tx) = self.peer.take() {
            tx.close();
        }
        self.inbox.close();
    }
}

impl MessageSink for WindowPort {
    fn post_message(&mut self, message: &Message) {
        self.post_value(message_to_value(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pair_delivers_in_post_order() {
        let (mut editor, mut target) = WindowChannel::pair();
        editor.post_message(&Message::ping());
        editor.post_message(&Message::update_radius("1rem"));

        assert_eq!(target.try_recv_message(), Some(Message::ping()));
        assert_eq!(target.try_recv_message(), Some(Message::update_radius("1rem")));
        assert_eq!(target.try_recv_message(), None);
    }

    #[test]
    fn test_top_level_post_is_noop() {
        let mut port = WindowPort::top_level();
        assert!(!port.is_embedded());
        port.post_message(&Message::ready());
        assert!(port.try_recv().is_none());
    }

    #[test]
    fn test_unknown_payloads_are_skipped() {
        let (mut editor, mut target) = WindowChannel::pair();
        editor.post_value(json!({"type": "SOMETHING_UNKNOWN"}));
        editor.post_value(json!(42));
        editor.post_message(&Message::pong());

        assert_eq!(target.try_recv_message(), Some(Message::pong()));
    }

    #[test]
    fn test_detached_peer_drops_silently() {
        let (mut editor, mut target) = WindowChannel::pair();
        target.detach();
        assert!(!editor.is_embedded());
        editor.post_message(&Message::ping());
        target.post_message(&Message::pong());
        assert!(editor.try_recv().is_none());
    }

    #[test]
    fn test_css_vars_keep_insertion_order_across_the_channel() {
        let (mut editor, mut target) = WindowChannel::pair();
        let mut vars = crate::protocol::CssVars::new();
        for name in ["--radius", "--background", "--accent", "--primary"] {
            vars.insert(name.to_string(), "x".to_string());
        }
        editor.post_message(&Message::ApplyTheme {
            css_vars: vars,
            dark_mode: None,
        });

        let Some(Message::ApplyTheme { css_vars, .. }) = target.try_recv_message() else {
            panic!("expected APPLY_THEME");
        };
        let names: Vec<&str> = css_vars.keys().map(String::as_str).collect();
        assert_eq!(names, ["--radius", "--background", "--accent", "--primary"]);
    }

    #[test]
    fn test_vec_sink_records() {
        let mut sink: Vec<Message> = Vec::new();
        sink.post_message(&Message::ping());
        assert_eq!(sink, vec![Message::ping()]);
    }
}
