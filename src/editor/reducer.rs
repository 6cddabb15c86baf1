//! Config reducer - the single entry point for theme changes
//!
//! Merges partial updates into the current config and decides which message
//! describes the change:
//! - exactly one known axis touched → granular message for that axis
//! - several axes, an unknown key, or first-time initialization → full `APPLY_THEME`
//! - the touched axis set to null → nothing (no opinion yet)

use tracing::{debug, error, warn};

use crate::presets::{Presets, DEFAULT_FONT};
use crate::protocol::Message;
use crate::theme::css::{both_mode_color_vars, resolve_color_preset};
use crate::theme::{resolved_css_vars, ThemeConfig, ThemeConfigPatch, ThemeField};
use crate::transport::MessageSink;

/// Observer called with the new config after every update
pub type ThemeChangeHook = Box<dyn FnMut(&ThemeConfig)>;

pub struct ConfigReducer {
    config: ThemeConfig,
    presets: Presets,
    on_theme_change: Option<ThemeChangeHook>,
}

impl std::fmt::Debug for ConfigReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigReducer")
            .field("config", &self.config)
            .field("has_hook", &self.on_theme_change.is_some())
            .finish()
    }
}

impl Default for ConfigReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigReducer {
    pub fn new() -> Self {
        Self::with_presets(Presets::builtin())
    }

    pub fn with_presets(presets: Presets) -> Self {
        ConfigReducer {
            config: ThemeConfig::default(),
            presets,
            on_theme_change: None,
        }
    }

    pub fn set_on_theme_change(&mut self, hook: impl FnMut(&ThemeConfig) + 'static) {
        self.on_theme_change = Some(Box::new(hook));
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    /// Merge `patch`, post the message(s) describing it, then notify the observer
    pub fn update_config(&mut self, patch: ThemeConfigPatch, sink: &mut dyn MessageSink) {
        let next = self.config.merged(&patch);
        let messages = self.plan_messages(&patch, &next);
        self.config = next;

        debug!(
            touched = ?patch.touched_fields(),
            messages = messages.len(),
            "Theme config updated"
        );
        for message in &messages {
            sink.post_message(message);
        }
        self.notify();
    }

    /// Replace the whole config and push it as one full theme message
    pub fn initialize(&mut self, config: ThemeConfig, sink: &mut dyn MessageSink) {
        self.config = config;
        sink.post_message(&self.full_theme_message());
        self.notify();
    }

    /// Back to all-null; the DOM is reset separately
    pub fn reset(&mut self) {
        self.config = ThemeConfig::default();
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(hook) = self.on_theme_change.as_mut() {
            hook(&self.config);
        }
    }

    /// `APPLY_THEME` for the current resolved mode
    pub fn full_theme_message(&self) -> Message {
        full_theme_message(&self.config, &self.presets)
    }

    /// Which messages describe moving to `next` via `patch`
    pub fn plan_messages(&self, patch: &ThemeConfigPatch, next: &ThemeConfig) -> Vec<Message> {
        let fields = patch.touched_fields();
        if fields.len() != 1 {
            return vec![full_theme_message(next, &self.presets)];
        }

        let granular = match &fields[0] {
            ThemeField::DarkMode => next.dark_mode.map(Message::toggle_dark_mode),
            ThemeField::Radius => next.radius.clone().map(Message::update_radius),
            ThemeField::ColorPreset => match &next.color_preset {
                Some(name) => self.colors_message(name),
                None => None,
            },
            ThemeField::Font => match &next.font {
                Some(font) => self.font_message(font),
                None => None,
            },
            ThemeField::Other(key) => {
                debug!(key = %key, "Unrecognized field, sending full theme");
                Some(full_theme_message(next, &self.presets))
            }
        };
        granular.into_iter().collect()
    }

    fn colors_message(&self, name: &str) -> Option<Message> {
        match resolve_color_preset(&self.presets.colors, name) {
            Some(preset) => Some(Message::UpdateColors {
                css_vars: both_mode_color_vars(preset),
            }),
            None => {
                error!(color_preset = %name, "No color preset available, nothing sent");
                None
            }
        }
    }

    fn font_message(&self, font: &str) -> Option<Message> {
        let preset = match self.presets.fonts.get(font) {
            Some(preset) => preset,
            None => {
                warn!(font = %font, fallback = DEFAULT_FONT, "Unknown font, falling back to default");
                match self.presets.fonts.get(DEFAULT_FONT) {
                    Some(preset) => preset,
                    None => {
                        error!(font = %font, "Default font missing from catalog, nothing sent");
                        return None;
                    }
                }
            }
        };
        Some(Message::update_font(
            &preset.value,
            &preset.font_family,
            &preset.google_fonts_url,
        ))
    }
}

/// Full theme for `config`; `darkMode` is omitted while undecided
pub fn full_theme_message(config: &ThemeConfig, presets: &Presets) -> Message {
    Message::apply_theme(resolved_css_vars(config, &presets.colors), config.dark_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{ColorCatalog, FontCatalog};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run(reducer: &mut ConfigReducer, patch: ThemeConfigPatch) -> Vec<Message> {
        let mut sent: Vec<Message> = Vec::new();
        reducer.update_config(patch, &mut sent);
        sent
    }

    #[test]
    fn test_single_dark_mode_emits_toggle_only() {
        let mut reducer = ConfigReducer::new();
        let sent = run(&mut reducer, ThemeConfigPatch::new().dark_mode(true));
        assert_eq!(sent, vec![Message::toggle_dark_mode(true)]);
        assert_eq!(reducer.config().dark_mode, Some(true));
    }

    #[test]
    fn test_two_fields_emit_full_theme() {
        let mut reducer = ConfigReducer::new();
        let sent = run(
            &mut reducer,
            ThemeConfigPatch::new().dark_mode(true).radius("1rem"),
        );
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            Message::ApplyTheme {
                css_vars,
                dark_mode,
            } => {
                assert_eq!(*dark_mode, Some(true));
                assert_eq!(css_vars["radius"], "1rem");
            }
            other => panic!("Expected ApplyTheme, got {:?}", other),
        }
    }

    #[test]
    fn test_null_single_field_emits_nothing() {
        let mut reducer = ConfigReducer::new();
        run(&mut reducer, ThemeConfigPatch::new().radius("0.5rem"));
        let sent = run(&mut reducer, ThemeConfigPatch::new().clear_radius());
        assert!(sent.is_empty());
        assert_eq!(reducer.config().radius, None);
    }

    #[test]
    fn test_color_preset_emits_both_modes() {
        let mut reducer = ConfigReducer::new();
        let sent = run(&mut reducer, ThemeConfigPatch::new().color_preset("blue"));
        let blue = ColorCatalog::builtin().get("blue").unwrap();
        assert_eq!(
            sent,
            vec![Message::update_colors(
                blue.colors.light.clone(),
                blue.colors.dark.clone()
            )]
        );
        assert_eq!(reducer.config().color_preset.as_deref(), Some("blue"));
    }

    #[test]
    fn test_unknown_color_preset_falls_back() {
        let mut reducer = ConfigReducer::new();
        let sent = run(&mut reducer, ThemeConfigPatch::new().color_preset("plaid"));
        let neutral = ColorCatalog::builtin().get("neutral").unwrap();
        assert_eq!(
            sent,
            vec![Message::update_colors(
                neutral.colors.light.clone(),
                neutral.colors.dark.clone()
            )]
        );
        assert_eq!(reducer.config().color_preset.as_deref(), Some("plaid"));
    }

    #[test]
    fn test_font_resolves_from_catalog() {
        let mut reducer = ConfigReducer::new();
        let sent = run(&mut reducer, ThemeConfigPatch::new().font("roboto"));
        match &sent[..] {
            [Message::UpdateFont {
                font_id,
                google_fonts_url,
                ..
            }] => {
                assert_eq!(font_id, "roboto");
                assert!(google_fonts_url.contains("family=Roboto"));
            }
            other => panic!("Expected one UpdateFont, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_font_falls_back_to_default() {
        let mut reducer = ConfigReducer::new();
        let sent = run(&mut reducer, ThemeConfigPatch::new().font("wingdings"));
        match &sent[..] {
            [Message::UpdateFont { font_id, .. }] => assert_eq!(font_id, DEFAULT_FONT),
            other => panic!("Expected one UpdateFont, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_default_font_sends_nothing() {
        let presets = Presets {
            fonts: FontCatalog::new(Vec::new()),
            ..Presets::builtin()
        };
        let mut reducer = ConfigReducer::with_presets(presets);
        let sent = run(&mut reducer, ThemeConfigPatch::new().font("inter"));
        assert!(sent.is_empty());
        assert_eq!(reducer.config().font.as_deref(), Some("inter"));
    }

    #[test]
    fn test_unknown_key_emits_full_theme() {
        let mut reducer = ConfigReducer::new();
        let sent = run(
            &mut reducer,
            ThemeConfigPatch::new().other("shadow", serde_json::json!("lg")),
        );
        assert!(matches!(sent.as_slice(), [Message::ApplyTheme { .. }]));
    }

    #[test]
    fn test_full_theme_uses_current_mode() {
        let mut reducer = ConfigReducer::new();
        run(&mut reducer, ThemeConfigPatch::new().color_preset("rose"));
        let sent = run(
            &mut reducer,
            ThemeConfigPatch::new().dark_mode(true).radius("0.3rem"),
        );
        let rose = ColorCatalog::builtin().get("rose").unwrap();
        match &sent[0] {
            Message::ApplyTheme { css_vars, .. } => {
                assert_eq!(css_vars["primary"], rose.colors.dark["primary"]);
            }
            other => panic!("Expected ApplyTheme, got {:?}", other),
        }
    }

    #[test]
    fn test_initialize_sends_full_theme() {
        let mut reducer = ConfigReducer::new();
        let mut sent: Vec<Message> = Vec::new();
        reducer.initialize(
            ThemeConfig {
                radius: Some("1rem".into()),
                ..Default::default()
            },
            &mut sent,
        );
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], Message::ApplyTheme { dark_mode: None, .. }));
    }

    #[test]
    fn test_hook_runs_after_every_update_even_when_nothing_sent() {
        let seen: Rc<RefCell<Vec<ThemeConfig>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_hook = Rc::clone(&seen);

        let mut reducer = ConfigReducer::new();
        reducer.set_on_theme_change(move |config| seen_hook.borrow_mut().push(config.clone()));

        run(&mut reducer, ThemeConfigPatch::new().radius("1rem"));
        run(&mut reducer, ThemeConfigPatch::new().clear_dark_mode());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].radius.as_deref(), Some("1rem"));
        assert_eq!(seen[1].dark_mode, None);
    }
}
