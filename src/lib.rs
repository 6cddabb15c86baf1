//! previewcn - live shadcn/ui theme editing across windows
//!
//! An editor picks colors, radius, font and light/dark mode; a receiver
//! installed in the target page applies them to its live DOM. The two talk
//! over a tagged JSON message protocol with a ping/pong heartbeat, or, in the
//! same-document devtools topology, the editor drives the DOM directly.

pub mod config;
pub mod devtools;
pub mod dom;
pub mod editor;
pub mod error;
pub mod logging;
pub mod presets;
pub mod protocol;
pub mod receiver;
pub mod storage;
pub mod theme;
pub mod transport;

pub use devtools::DevtoolsPanel;
pub use editor::{ConfigReducer, ConnectionStatus, EditorSession};
pub use error::{PreviewError, Result};
pub use protocol::Message;
pub use receiver::ThemeReceiver;
pub use theme::{ThemeConfig, ThemeConfigPatch};

#[cfg(test)]
#[path = "sync_tests.rs"]
mod sync_tests;
