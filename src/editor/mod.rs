//! Editor side of the theme-sync protocol
//!
//! - `reducer` - merges partial updates and picks granular vs full messages
//! - `tracker` - ping/pong heartbeat and derived connection status
//! - `session` - the hook-shaped state a theme editor UI drives
//! - `url` / `clipboard` - target URL validation and CSS copy

pub mod clipboard;
mod reducer;
mod session;
mod tracker;
mod url;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use reducer::{full_theme_message, ConfigReducer, ThemeChangeHook};
pub use session::{EditorSession, BLOCKED_GUIDANCE, IFRAME_LOAD_ERROR};
pub use tracker::{derive_status, ConnectionStatus, ConnectionTracker, Heartbeat, HeartbeatEvent};
pub use self::url::validate_url;
