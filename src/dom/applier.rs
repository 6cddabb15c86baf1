//! Idempotent DOM styling procedures
//!
//! Shared by the cross-window receiver and the same-document devtools panel,
//! so both topologies produce identical DOM side effects for the same message.
//!
//! At most one color stylesheet and one font stylesheet exist per registry no
//! matter how many messages are applied. Every inline property written through
//! the applier is recorded so `clear` is a true inverse of apply.

use std::collections::BTreeSet;
use tracing::{debug, warn};

use super::{Document, ElementTag, Priority};
use crate::protocol::{CssVars, Message, ModeCssVars};
use crate::theme::serialize_css_vars;

/// Only stylesheet URLs under this prefix are ever injected
pub const TRUSTED_FONT_HOST: &str = "https://fonts.googleapis.com/";

const RADIUS_PROPERTY: &str = "--radius";
const COLOR_SCHEME_PROPERTY: &str = "color-scheme";
const FONT_PROPERTIES: &[&str] = &["--font-sans", "--font-sans-override"];

/// Fixed element ids for the injected resources of one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    pub color_style_id: String,
    pub font_style_id: String,
    pub font_link_prefix: String,
    pub trusted_font_host: String,
}

impl StyleRegistry {
    /// Ids used by the receiver installed in the target page
    pub fn receiver() -> Self {
        StyleRegistry {
            color_style_id: "previewcn-theme-colors".into(),
            font_style_id: "previewcn-theme-font".into(),
            font_link_prefix: "previewcn-font-".into(),
            trusted_font_host: TRUSTED_FONT_HOST.into(),
        }
    }

    /// Ids used by the devtools panel mounted inside the page
    pub fn devtools() -> Self {
        StyleRegistry {
            color_style_id: "previewcn-devtools-theme-colors".into(),
            font_style_id: "previewcn-devtools-theme-font".into(),
            font_link_prefix: "previewcn-font-".into(),
            trusted_font_host: TRUSTED_FONT_HOST.into(),
        }
    }

    pub fn with_trusted_font_host(mut self, host: impl Into<String>) -> Self {
        self.trusted_font_host = host.into();
        self
    }

    pub fn font_link_id(&self, font_id: &str) -> String {
        format!("{}{}", self.font_link_prefix, font_id)
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::receiver()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StyleApplier {
    registry: StyleRegistry,
    applied_properties: BTreeSet<String>,
}

impl StyleApplier {
    pub fn new(registry: StyleRegistry) -> Self {
        StyleApplier {
            registry,
            applied_properties: BTreeSet::new(),
        }
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Get-or-create a singleton `<style>` element by id
    ///
    /// A colliding element with the wrong tag is removed and replaced.
    pub fn ensure_style_element(doc: &mut dyn Document, id: &str) {
        match doc.element_tag(id) {
            Some(ElementTag::Style) => {}
            Some(tag) => {
                warn!(element_id = %id, tag = ?tag, "Replacing element with conflicting id");
                doc.remove_element(id);
                doc.append_style(id);
            }
            None => doc.append_style(id),
        }
    }

    fn set_property(&mut self, doc: &mut dyn Document, name: &str, value: &str, priority: Priority) {
        doc.set_root_property(name, value, priority);
        self.applied_properties.insert(name.to_string());
    }

    /// Write every variable onto the root element's inline style
    pub fn apply_css_vars(&mut self, doc: &mut dyn Document, vars: &CssVars) {
        for (key, value) in vars {
            self.set_property(doc, &format!("--{}", key), value, Priority::Normal);
        }
    }

    /// `dark` class only; used by full theme application
    pub fn apply_dark_class(&mut self, doc: &mut dyn Document, dark_mode: bool) {
        if dark_mode {
            doc.add_root_class("dark");
        } else {
            doc.remove_root_class("dark");
        }
    }

    /// Swap `light`/`dark` classes and set `color-scheme`; variables untouched
    pub fn apply_dark_mode(&mut self, doc: &mut dyn Document, dark_mode: bool) {
        let (add, remove, scheme) = if dark_mode {
            ("dark", "light", "dark")
        } else {
            ("light", "dark", "light")
        };
        doc.remove_root_class(remove);
        doc.add_root_class(add);
        self.set_property(doc, COLOR_SCHEME_PROPERTY, scheme, Priority::Normal);
    }

    pub fn apply_radius(&mut self, doc: &mut dyn Document, radius: &str) {
        self.set_property(doc, RADIUS_PROPERTY, radius, Priority::Normal);
    }

    /// Rewrite the color stylesheet with both mode blocks
    pub fn apply_colors(&mut self, doc: &mut dyn Document, vars: &ModeCssVars) {
        let id = self.registry.color_style_id.clone();
        Self::ensure_style_element(doc, &id);
        let text = format!(
            ":root {{ {} }} .dark {{ {} }}",
            serialize_css_vars(&vars.light),
            serialize_css_vars(&vars.dark)
        );
        doc.set_style_text(&id, &text);
    }

    /// Load a Google Font and point the font variables at it
    ///
    /// Returns false (and changes nothing) when the stylesheet URL is outside
    /// the trusted host or the family is not a plain font list.
    pub fn apply_font(
        &mut self,
        doc: &mut dyn Document,
        font_id: &str,
        font_family: &str,
        google_fonts_url: &str,
    ) -> bool {
        if !google_fonts_url.starts_with(&self.registry.trusted_font_host) {
            warn!(
                font_id = %font_id,
                url = %google_fonts_url,
                trusted_host = %self.registry.trusted_font_host,
                "Rejected font stylesheet from untrusted host"
            );
            return false;
        }

        if font_family.contains(|c: char| matches!(c, ';' | '{' | '}' | '<' | '>' | '\n')) {
            warn!(
                font_id = %font_id,
                font_family = %font_family,
                "Rejected font family that would break out of its declaration"
            );
            return false;
        }

        let link_id = self.registry.font_link_id(font_id);
        if doc.element_tag(&link_id).is_none() {
            doc.append_stylesheet_link(&link_id, google_fonts_url);
        }

        let style_id = self.registry.font_style_id.clone();
        Self::ensure_style_element(doc, &style_id);
        let text = format!(
            ":root {{ --font-sans: {family} !important; --font-sans-override: {family} !important; --font-geist-sans: {family} !important; }} html, body, .font-sans {{ font-family: {family} !important; }}",
            family = font_family
        );
        doc.set_style_text(&style_id, &text);

        for name in FONT_PROPERTIES {
            self.set_property(doc, name, font_family, Priority::Important);
        }
        true
    }

    /// Apply one theme message; returns true if the DOM was touched
    ///
    /// Handshake messages are never theme changes and return false.
    pub fn apply_message(&mut self, doc: &mut dyn Document, message: &Message) -> bool {
        match message {
            Message::ApplyTheme {
                css_vars,
                dark_mode,
            } => {
                self.apply_css_vars(doc, css_vars);
                if let Some(dark) = dark_mode {
                    self.apply_dark_class(doc, *dark);
                }
                true
            }
            Message::ToggleDarkMode { dark_mode } => {
                self.apply_dark_mode(doc, *dark_mode);
                true
            }
            Message::UpdateRadius { radius } => {
                self.apply_radius(doc, radius);
                true
            }
            Message::UpdateColors { css_vars } => {
                self.apply_colors(doc, css_vars);
                true
            }
            Message::UpdateFont {
                font_id,
                font_family,
                google_fonts_url,
            } => self.apply_font(doc, font_id, font_family, google_fonts_url),
            Message::Ready {} | Message::Ping {} | Message::Pong {} => {
                debug!(message_type = message.message_type(), "Not a theme message");
                false
            }
        }
    }

    /// Return the page to its own default styling
    pub fn clear(&mut self, doc: &mut dyn Document) {
        for id in [
            self.registry.color_style_id.as_str(),
            self.registry.font_style_id.as_str(),
        ] {
            while doc.remove_element(id) {}
        }

        for id in doc.head_element_ids() {
            if id.starts_with(&self.registry.font_link_prefix) {
                doc.remove_element(&id);
            }
        }

        let mut properties = std::mem::take(&mut self.applied_properties);
        properties.insert(RADIUS_PROPERTY.to_string());
        properties.insert(COLOR_SCHEME_PROPERTY.to_string());
        properties.extend(FONT_PROPERTIES.iter().map(|p| p.to_string()));
        for name in &properties {
            doc.remove_root_property(name);
        }

        doc.remove_root_class("light");
        doc.remove_root_class("dark");
    }
}
