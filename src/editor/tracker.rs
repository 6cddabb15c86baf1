//! Connection tracking for the embedded target
//!
//! Liveness comes from a ping/pong heartbeat: every `interval` the editor
//! posts `PREVIEWCN_PING` and expects any reply within `timeout`. The
//! displayed status is derived from the surface state plus the receiver flag
//! and never stored on its own.
//!
//! Time is passed in explicitly (`Instant`) so the state machine can be
//! driven deterministically by a host event loop or by tests.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::protocol::Message;
use crate::transport::MessageSink;

/// What the editor shows next to the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
    Blocked,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Blocked => "blocked",
        };
        f.write_str(label)
    }
}

/// Pure status derivation
///
/// No URL or still loading → disconnected; the surface failed → blocked;
/// otherwise whatever the receiver flag says.
pub fn derive_status(
    has_url: bool,
    is_loading: bool,
    has_error: bool,
    receiver_connected: bool,
) -> ConnectionStatus {
    if !has_url || is_loading {
        ConnectionStatus::Disconnected
    } else if has_error {
        ConnectionStatus::Blocked
    } else if receiver_connected {
        ConnectionStatus::Connected
    } else {
        ConnectionStatus::Disconnected
    }
}

/// What a heartbeat poll asks the caller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatEvent {
    /// Post a ping now
    Ping,
    /// The last ping's deadline passed
    Expired,
}

/// Repeating ping schedule with a per-ping deadline
#[derive(Debug, Clone)]
pub struct Heartbeat {
    interval: Duration,
    timeout: Duration,
    next_ping_at: Option<Instant>,
    pong_deadline: Option<Instant>,
}

impl Heartbeat {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Heartbeat {
            interval,
            timeout,
            next_ping_at: None,
            pong_deadline: None,
        }
    }

    /// Schedule the first ping for `now`
    pub fn start(&mut self, now: Instant) {
        self.next_ping_at = Some(now);
        self.pong_deadline = None;
    }

    /// Cancel the schedule and any pending deadline
    pub fn stop(&mut self) {
        self.next_ping_at = None;
        self.pong_deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_ping_at.is_some()
    }

    pub fn has_pending_deadline(&self) -> bool {
        self.pong_deadline.is_some()
    }

    /// Any reply clears the outstanding deadline
    pub fn acknowledge(&mut self) {
        self.pong_deadline = None;
    }

    /// Events due at `now`, deadline expiry first
    pub fn poll(&mut self, now: Instant) -> Vec<HeartbeatEvent> {
        let mut events = Vec::new();
        if self.pong_deadline.is_some_and(|deadline| now >= deadline) {
            self.pong_deadline = None;
            events.push(HeartbeatEvent::Expired);
        }
        if let Some(next) = self.next_ping_at {
            if now >= next {
                // Skip missed periods instead of bursting pings
                let mut following = next + self.interval;
                while following <= now {
                    following += self.interval;
                }
                self.next_ping_at = Some(following);
                self.pong_deadline = Some(now + self.timeout);
                events.push(HeartbeatEvent::Ping);
            }
        }
        events
    }
}

/// Editor-side view of the target frame
#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    heartbeat: Heartbeat,
    has_url: bool,
    is_loading: bool,
    has_error: bool,
    receiver_connected: bool,
    last_contact_at: Option<Instant>,
}

impl ConnectionTracker {
    pub fn new(ping_interval: Duration, pong_timeout: Duration) -> Self {
        ConnectionTracker {
            heartbeat: Heartbeat::new(ping_interval, pong_timeout),
            has_url: false,
            is_loading: false,
            has_error: false,
            receiver_connected: false,
            last_contact_at: None,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        derive_status(
            self.has_url,
            self.is_loading,
            self.has_error,
            self.receiver_connected,
        )
    }

    pub fn is_receiver_connected(&self) -> bool {
        self.receiver_connected
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn heartbeat(&self) -> &Heartbeat {
        &self.heartbeat
    }

    /// A new target starts loading; the old receiver no longer counts
    pub fn set_target_url(&mut self, url: &str) {
        self.has_url = !url.is_empty();
        self.is_loading = self.has_url;
        self.has_error = false;
        self.receiver_connected = false;
        self.last_contact_at = None;
        self.heartbeat.stop();
    }

    /// Frame finished loading: start probing if there is a target to probe
    pub fn surface_loaded(&mut self, now: Instant) {
        self.is_loading = false;
        self.has_error = false;
        if !self.has_url {
            debug!("Frame loaded without a target URL, heartbeat stays off");
            return;
        }
        self.heartbeat.start(now);
        debug!("Target loaded, heartbeat started");
    }

    /// Frame failed to load (refused, blocked by CSP, ...)
    pub fn surface_failed(&mut self) {
        self.is_loading = false;
        self.has_error = true;
        self.receiver_connected = false;
        self.heartbeat.stop();
    }

    /// Frame removed from the page
    pub fn surface_torn_down(&mut self) {
        self.is_loading = false;
        self.receiver_connected = false;
        self.heartbeat.stop();
    }

    /// Observe an inbound message; only handshake replies matter here
    pub fn handle_message(&mut self, message: &Message, now: Instant) {
        match message {
            Message::Ready {} | Message::Pong {} => {
                if !self.receiver_connected {
                    info!(message_type = message.message_type(), "Receiver connected");
                }
                self.receiver_connected = true;
                self.last_contact_at = Some(now);
                self.heartbeat.acknowledge();
            }
            _ => {}
        }
    }

    /// Advance the heartbeat, posting pings into `sink`
    pub fn tick(&mut self, now: Instant, sink: &mut dyn MessageSink) {
        for event in self.heartbeat.poll(now) {
            match event {
                HeartbeatEvent::Expired => {
                    let silent_for = self
                        .last_contact_at
                        .map(|last| now.saturating_duration_since(last));
                    let stale = silent_for.map_or(true, |d| d > self.heartbeat.timeout);
                    if stale && self.receiver_connected {
                        info!(silent_for = ?silent_for, "No pong before deadline, receiver disconnected");
                        self.receiver_connected = false;
                    }
                }
                HeartbeatEvent::Ping => sink.post_message(&Message::ping()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(3000);
    const TIMEOUT: Duration = Duration::from_millis(2000);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn loaded_tracker(t0: Instant) -> ConnectionTracker {
        let mut tracker = ConnectionTracker::new(INTERVAL, TIMEOUT);
        tracker.set_target_url("/preview");
        tracker.surface_loaded(t0);
        tracker
    }

    #[test]
    fn test_derive_status_table() {
        use ConnectionStatus::*;
        assert_eq!(derive_status(false, false, false, true), Disconnected);
        assert_eq!(derive_status(true, true, true, true), Disconnected);
        assert_eq!(derive_status(true, false, true, true), Blocked);
        assert_eq!(derive_status(true, false, false, true), Connected);
        assert_eq!(derive_status(true, false, false, false), Disconnected);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ConnectionStatus::Blocked).unwrap(),
            "\"blocked\""
        );
        assert_eq!(ConnectionStatus::Connected.to_string(), "connected");
    }

    #[test]
    fn test_load_without_target_url_sends_no_pings() {
        let t0 = Instant::now();
        let mut tracker = ConnectionTracker::new(INTERVAL, TIMEOUT);
        tracker.set_target_url("");
        tracker.surface_loaded(t0);
        assert!(!tracker.heartbeat().is_running());

        let mut sent: Vec<Message> = Vec::new();
        tracker.tick(t0, &mut sent);
        tracker.tick(t0 + INTERVAL, &mut sent);
        assert!(sent.is_empty());
        assert_eq!(tracker.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_first_ping_is_immediate() {
        let t0 = Instant::now();
        let mut tracker = loaded_tracker(t0);
        let mut sent: Vec<Message> = Vec::new();

        tracker.tick(t0, &mut sent);
        assert_eq!(sent, vec![Message::ping()]);

        tracker.tick(t0 + ms(2999), &mut sent);
        assert_eq!(sent.len(), 1);

        tracker.tick(t0 + INTERVAL, &mut sent);
        assert_eq!(sent.len(), 2);
    }

    #[test]
    fn test_pong_connects_and_clears_deadline() {
        let t0 = Instant::now();
        let mut tracker = loaded_tracker(t0);
        let mut sent: Vec<Message> = Vec::new();

        tracker.tick(t0, &mut sent);
        assert!(tracker.heartbeat().has_pending_deadline());

        tracker.handle_message(&Message::pong(), t0 + ms(50));
        assert_eq!(tracker.status(), ConnectionStatus::Connected);
        assert!(!tracker.heartbeat().has_pending_deadline());

        tracker.tick(t0 + ms(2500), &mut sent);
        assert_eq!(tracker.status(), ConnectionStatus::Connected);
    }

    #[test]
    fn test_silence_disconnects_after_deadline() {
        let t0 = Instant::now();
        let mut tracker = loaded_tracker(t0);
        let mut sent: Vec<Message> = Vec::new();

        tracker.handle_message(&Message::ready(), t0);
        tracker.tick(t0, &mut sent);
        tracker.handle_message(&Message::pong(), t0 + ms(10));
        assert!(tracker.is_receiver_connected());

        // Receiver stops answering; the ping at t0+3000 goes unanswered
        tracker.tick(t0 + INTERVAL, &mut sent);
        assert_eq!(tracker.status(), ConnectionStatus::Connected);
        tracker.tick(t0 + INTERVAL + TIMEOUT, &mut sent);
        assert_eq!(tracker.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_late_pong_reconnects() {
        let t0 = Instant::now();
        let mut tracker = loaded_tracker(t0);
        let mut sent: Vec<Message> = Vec::new();

        tracker.tick(t0, &mut sent);
        tracker.tick(t0 + TIMEOUT, &mut sent);
        assert!(!tracker.is_receiver_connected());

        tracker.handle_message(&Message::pong(), t0 + ms(2600));
        assert_eq!(tracker.status(), ConnectionStatus::Connected);
    }

    #[test]
    fn test_failed_surface_is_blocked_and_stops_heartbeat() {
        let mut tracker = ConnectionTracker::new(INTERVAL, TIMEOUT);
        tracker.set_target_url("http://localhost:3000");
        assert_eq!(tracker.status(), ConnectionStatus::Disconnected);

        tracker.surface_failed();
        assert_eq!(tracker.status(), ConnectionStatus::Blocked);
        assert!(!tracker.heartbeat().is_running());
    }

    #[test]
    fn test_new_url_resets_connection() {
        let t0 = Instant::now();
        let mut tracker = loaded_tracker(t0);
        tracker.handle_message(&Message::ready(), t0);
        assert_eq!(tracker.status(), ConnectionStatus::Connected);

        tracker.set_target_url("http://localhost:4000");
        assert_eq!(tracker.status(), ConnectionStatus::Disconnected);
        assert!(tracker.is_loading());
        assert!(!tracker.heartbeat().is_running());
    }

    #[test]
    fn test_teardown_stops_pings() {
        let t0 = Instant::now();
        let mut tracker = loaded_tracker(t0);
        tracker.surface_torn_down();

        let mut sent: Vec<Message> = Vec::new();
        tracker.tick(t0 + ms(10_000), &mut sent);
        assert!(sent.is_empty());
    }

    #[test]
    fn test_poll_skips_missed_periods() {
        let t0 = Instant::now();
        let mut heartbeat = Heartbeat::new(INTERVAL, TIMEOUT);
        heartbeat.start(t0);

        assert_eq!(heartbeat.poll(t0), vec![HeartbeatEvent::Ping]);
        // Host stalled for three periods: one expiry, one ping
        assert_eq!(
            heartbeat.poll(t0 + ms(9500)),
            vec![HeartbeatEvent::Expired, HeartbeatEvent::Ping]
        );
        assert_eq!(heartbeat.poll(t0 + ms(11_999)), vec![HeartbeatEvent::Expired]);
    }

    #[test]
    fn test_non_handshake_messages_ignored() {
        let t0 = Instant::now();
        let mut tracker = loaded_tracker(t0);
        tracker.handle_message(&Message::update_radius("1rem"), t0);
        assert!(!tracker.is_receiver_connected());
    }
}
