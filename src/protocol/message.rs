//! Protocol Message enum
//!
//! The tag set is closed and versionless. Consumers match exhaustively and
//! drop anything they cannot classify (see `io::parse_value_graceful`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// CSS custom properties keyed by name without the leading `--`.
///
/// Insertion order is preserved so serialized stylesheets are stable.
pub type CssVars = IndexMap<String, String>;

/// Variable sets for both modes, written as one stylesheet by the receiver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCssVars {
    #[serde(default)]
    pub light: CssVars,
    #[serde(default)]
    pub dark: CssVars,
}

/// Protocol message with type discrimination via serde tag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    // ============================================================
    // THEME
    // ============================================================
    /// Full resolved variable set for one mode
    ///
    /// # Example
    /// ```json
    /// {"type":"APPLY_THEME","cssVars":{"primary":"oklch(0.488 0.243 264.376)","radius":"0.5rem"},"darkMode":false}
    /// ```
    #[serde(rename = "APPLY_THEME")]
    ApplyTheme {
        #[serde(rename = "cssVars", default)]
        css_vars: CssVars,
        #[serde(rename = "darkMode", default, skip_serializing_if = "Option::is_none")]
        dark_mode: Option<bool>,
    },

    /// Mode switch only; the target's own variable sets stay authoritative
    #[serde(rename = "TOGGLE_DARK_MODE")]
    ToggleDarkMode {
        #[serde(rename = "darkMode")]
        dark_mode: bool,
    },

    #[serde(rename = "UPDATE_RADIUS")]
    UpdateRadius { radius: String },

    /// Both modes at once so a later mode switch needs no round trip
    #[serde(rename = "UPDATE_COLORS")]
    UpdateColors {
        #[serde(rename = "cssVars")]
        css_vars: ModeCssVars,
    },

    #[serde(rename = "UPDATE_FONT")]
    UpdateFont {
        #[serde(rename = "fontId")]
        font_id: String,
        #[serde(rename = "fontFamily")]
        font_family: String,
        #[serde(rename = "googleFontsUrl")]
        google_fonts_url: String,
    },

    // ============================================================
    // HANDSHAKE
    // ============================================================
    /// Receiver exists and is listening
    #[serde(rename = "PREVIEWCN_READY")]
    Ready {},

    #[serde(rename = "PREVIEWCN_PING")]
    Ping {},

    #[serde(rename = "PREVIEWCN_PONG")]
    Pong {},
}

impl Message {
    pub fn apply_theme(css_vars: CssVars, dark_mode: Option<bool>) -> Self {
        Message::ApplyTheme {
            css_vars,
            dark_mode,
        }
    }

    pub fn toggle_dark_mode(dark_mode: bool) -> Self {
        Message::ToggleDarkMode { dark_mode }
    }

    pub fn update_radius(radius: impl Into<String>) -> Self {
        Message::UpdateRadius {
            radius: radius.into(),
        }
    }

    pub fn update_colors(light: CssVars, dark: CssVars) -> Self {
        Message::UpdateColors {
            css_vars: ModeCssVars { light, dark },
        }
    }

    pub fn update_font(
        font_id: impl Into<String>,
        font_family: impl Into<String>,
        google_fonts_url: impl Into<String>,
    ) -> Self {
        Message::UpdateFont {
            font_id: font_id.into(),
            font_family: font_family.into(),
            google_fonts_url: google_fonts_url.into(),
        }
    }

    pub fn ready() -> Self {
        Message::Ready {}
    }

    pub fn ping() -> Self {
        Message::Ping {}
    }

    pub fn pong() -> Self {
        Message::Pong {}
    }

    /// The wire tag of this message
    pub fn message_type(&self) -> &'static str {
        match self {
            Message::ApplyTheme { .. } => "APPLY_THEME",
            Message::ToggleDarkMode { .. } => "TOGGLE_DARK_MODE",
            Message::UpdateRadius { .. } => "UPDATE_RADIUS",
            Message::UpdateColors { .. } => "UPDATE_COLORS",
            Message::UpdateFont { .. } => "UPDATE_FONT",
            Message::Ready {} => "PREVIEWCN_READY",
            Message::Ping {} => "PREVIEWCN_PING",
            Message::Pong {} => "PREVIEWCN_PONG",
        }
    }

    /// Handshake messages only carry liveness and never trigger theme application
    pub fn is_handshake(&self) -> bool {
        matches!(
            self,
            Message::Ready {} | Message::Ping {} | Message::Pong {}
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handshake_tags_on_the_wire() {
        assert_eq!(
            serde_json::to_value(Message::ping()).unwrap(),
            json!({"type": "PREVIEWCN_PING"})
        );
        assert_eq!(
            serde_json::to_value(Message::ready()).unwrap(),
            json!({"type": "PREVIEWCN_READY"})
        );
    }

    #[test]
    fn test_apply_theme_omits_absent_dark_mode() {
        let mut vars = CssVars::new();
        vars.insert("radius".into(), "1rem".into());
        let value = serde_json::to_value(Message::apply_theme(vars, None)).unwrap();
        assert_eq!(value, json!({"type": "APPLY_THEME", "cssVars": {"radius": "1rem"}}));
    }

    #[test]
    fn test_update_font_uses_camel_case_fields() {
        let msg = Message::update_font(
            "inter",
            "\"Inter\", sans-serif",
            "https://fonts.googleapis.com/css2?family=Inter",
        );
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "UPDATE_FONT");
        assert_eq!(value["fontId"], "inter");
        assert_eq!(value["fontFamily"], "\"Inter\", sans-serif");
        assert!(value["googleFontsUrl"]
            .as_str()
            .unwrap()
            .starts_with("https://fonts.googleapis.com/"));
    }

    #[test]
    fn test_update_colors_preserves_variable_order() {
        let json = r#"{"type":"UPDATE_COLORS","cssVars":{"light":{"zeta":"1","alpha":"2"},"dark":{}}}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        match msg {
            Message::UpdateColors { css_vars } => {
                let keys: Vec<&str> = css_vars.light.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["zeta", "alpha"]);
            }
            other => panic!("Expected UpdateColors, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let json = r#"{"type":"UPDATE_RADIUS","radius":"0.3rem","source":"devtools","v":2}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg, Message::update_radius("0.3rem"));
    }

    #[test]
    fn test_message_type_matches_serde_tag() {
        let messages = [
            Message::apply_theme(CssVars::new(), Some(true)),
            Message::toggle_dark_mode(false),
            Message::update_radius("0rem"),
            Message::update_colors(CssVars::new(), CssVars::new()),
            Message::update_font("a", "b", "c"),
            Message::ready(),
            Message::ping(),
            Message::pong(),
        ];
        for msg in messages {
            let value = serde_json::to_value(&msg).unwrap();
            assert_eq!(value["type"], msg.message_type());
        }
    }

    #[test]
    fn test_is_handshake() {
        assert!(Message::pong().is_handshake());
        assert!(!Message::update_radius("1rem").is_handshake());
    }
}
