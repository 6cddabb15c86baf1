//! Same-document devtools panel
//!
//! The panel lives inside the target page, so there is no window hop and no
//! heartbeat: the config reducer's messages are applied straight to the
//! document through the same `StyleApplier` the receiver uses. The config is
//! persisted as JSON so a reload restores the last theme when the panel opens.

use tracing::{debug, info};

use crate::dom::{Document, StyleApplier, StyleRegistry};
use crate::editor::ConfigReducer;
use crate::protocol::Message;
use crate::storage::{get_json, set_json, KeyValueStore};
use crate::theme::{ThemeConfig, ThemeConfigPatch};
use crate::transport::MessageSink;

/// Storage key for the persisted devtools config
pub const DEVTOOLS_STORAGE_KEY: &str = "previewcn-devtools-theme";

/// Applies posted messages directly to a document
pub struct DocumentSink<'a> {
    document: &'a mut dyn Document,
    applier: &'a mut StyleApplier,
}

impl<'a> DocumentSink<'a> {
    pub fn new(document: &'a mut dyn Document, applier: &'a mut StyleApplier) -> Self {
        DocumentSink { document, applier }
    }
}

impl MessageSink for DocumentSink<'_> {
    fn post_message(&mut self, message: &Message) {
        self.applier.apply_message(&mut *self.document, message);
    }
}

pub struct DevtoolsPanel<D: Document> {
    document: D,
    applier: StyleApplier,
    reducer: ConfigReducer,
    store: Box<dyn KeyValueStore>,
}

impl<D: Document> DevtoolsPanel<D> {
    /// Restore the stored config (merged over all-null); nothing is applied yet
    pub fn new(document: D, store: Box<dyn KeyValueStore>) -> Self {
        let mut reducer = ConfigReducer::new();
        if let Some(stored) = get_json::<ThemeConfigPatch>(store.as_ref(), DEVTOOLS_STORAGE_KEY) {
            reducer.update_config(stored, &mut Vec::<Message>::new());
        }
        DevtoolsPanel {
            document,
            applier: StyleApplier::new(StyleRegistry::devtools()),
            reducer,
            store,
        }
    }

    pub fn with_registry(mut self, registry: StyleRegistry) -> Self {
        self.applier = StyleApplier::new(registry);
        self
    }

    /// Panel opened: apply whatever was restored
    pub fn mount(&mut self) {
        let config = self.reducer.config().clone();
        info!(restored = !config.is_empty(), "Devtools panel opened");
        self.apply_theme(&config);
    }

    pub fn config(&self) -> &ThemeConfig {
        self.reducer.config()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn set_color_preset(&mut self, name: impl Into<String>) {
        self.update(ThemeConfigPatch::new().color_preset(name));
    }

    pub fn set_radius(&mut self, radius: impl Into<String>) {
        self.update(ThemeConfigPatch::new().radius(radius));
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.update(ThemeConfigPatch::new().dark_mode(dark_mode));
    }

    pub fn set_font(&mut self, font: impl Into<String>) {
        self.update(ThemeConfigPatch::new().font(font));
    }

    fn update(&mut self, patch: ThemeConfigPatch) {
        let mut sink = DocumentSink::new(&mut self.document, &mut self.applier);
        self.reducer.update_config(patch, &mut sink);
        set_json(self.store.as_mut(), DEVTOOLS_STORAGE_KEY, self.reducer.config());
    }

    /// Apply every non-null field of `config`, one axis at a time
    pub fn apply_theme(&mut self, config: &ThemeConfig) {
        let mut sink = DocumentSink::new(&mut self.document, &mut self.applier);
        let mut axes = Vec::new();
        if let Some(name) = &config.color_preset {
            axes.push(ThemeConfigPatch::new().color_preset(name.clone()));
        }
        if let Some(radius) = &config.radius {
            axes.push(ThemeConfigPatch::new().radius(radius.clone()));
        }
        if let Some(dark_mode) = config.dark_mode {
            axes.push(ThemeConfigPatch::new().dark_mode(dark_mode));
        }
        if let Some(font) = &config.font {
            axes.push(ThemeConfigPatch::new().font(font.clone()));
        }
        for patch in &axes {
            for message in self.reducer.plan_messages(patch, config) {
                sink.post_message(&message);
            }
        }
        debug!(axes = axes.len(), "Applied devtools theme");
    }

    /// Forget the stored theme and return the page to its own styling
    pub fn reset_theme(&mut self) {
        self.store.remove(DEVTOOLS_STORAGE_KEY);
        self.applier.clear(&mut self.document);
        self.reducer.reset();
        info!("Devtools theme reset");
    }
}
