//! Clipboard seam for "Copy CSS"

use crate::error::{PreviewError, Result};

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard via arboard
///
/// A fresh handle is opened per write; holding one open blocks other
/// clipboard owners on some platforms.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PreviewError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| PreviewError::Clipboard(e.to_string()))
    }
}

/// Records writes in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
