//! Theme-sync protocol between the editor and the target page
//!
//! Messages cross the window boundary as structured-clone values (modelled as
//! `serde_json::Value`) and are always representable as JSON. Each message is a
//! flat record tagged by a `type` field.
//!
//! # Message Categories
//!
//! ## Theme (editor → target)
//! - `APPLY_THEME`: Full resolved variable set for the current mode
//! - `TOGGLE_DARK_MODE`: Mode switch only (class + color-scheme flip)
//! - `UPDATE_RADIUS`: Single `--radius` variable
//! - `UPDATE_COLORS`: Light and dark variable sets in one stylesheet
//! - `UPDATE_FONT`: Google Fonts stylesheet + font variables
//!
//! ## Handshake (liveness only, never touches the DOM)
//! - `PREVIEWCN_READY`: Target → editor, sent once on mount
//! - `PREVIEWCN_PING`: Editor → target heartbeat probe
//! - `PREVIEWCN_PONG`: Target → editor heartbeat reply
//!
//! # Module Structure
//!
//! - `message`: The closed `Message` enum and its constructors
//! - `io`: Graceful parsing (unknown tags are skipped, never errors), outbound values,
//!   and a JSONL reader for replaying captured traffic

mod io;
mod message;

pub use io::*;
pub use message::*;
