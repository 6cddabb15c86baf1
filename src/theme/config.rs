//! Theme configuration and partial updates
//!
//! Every field is optional: `None` means "no opinion yet" and is never
//! transmitted or applied.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The editor's in-memory theme (one per editor session)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default)]
    pub color_preset: Option<String>,
    #[serde(default)]
    pub radius: Option<String>,
    #[serde(default)]
    pub dark_mode: Option<bool>,
    #[serde(default)]
    pub font: Option<String>,
}

impl ThemeConfig {
    /// True when no field affecting visual output is set
    pub fn is_empty(&self) -> bool {
        self.color_preset.is_none()
            && self.radius.is_none()
            && self.dark_mode.is_none()
            && self.font.is_none()
    }

    /// Shallow merge, right-hand wins. Unknown patch fields are ignored here.
    pub fn merge(&mut self, patch: &ThemeConfigPatch) {
        if let Some(value) = &patch.color_preset {
            self.color_preset = value.clone();
        }
        if let Some(value) = &patch.radius {
            self.radius = value.clone();
        }
        if let Some(value) = patch.dark_mode {
            self.dark_mode = value;
        }
        if let Some(value) = &patch.font {
            self.font = value.clone();
        }
    }

    pub fn merged(&self, patch: &ThemeConfigPatch) -> ThemeConfig {
        let mut next = self.clone();
        next.merge(patch);
        next
    }
}

/// A theme axis named in a partial update
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeField {
    ColorPreset,
    Radius,
    DarkMode,
    Font,
    /// A key this version doesn't know about
    Other(String),
}

impl fmt::Display for ThemeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeField::ColorPreset => f.write_str("colorPreset"),
            ThemeField::Radius => f.write_str("radius"),
            ThemeField::DarkMode => f.write_str("darkMode"),
            ThemeField::Font => f.write_str("font"),
            ThemeField::Other(name) => f.write_str(name),
        }
    }
}

/// Distinguish "absent" (`None`) from "explicitly null" (`Some(None)`)
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update passed to `update_config`
///
/// Outer `None` = field not touched; `Some(None)` = field set to null.
///
/// # Example
/// ```json
/// {"darkMode": true}
/// {"colorPreset": "blue", "radius": "1rem"}
/// {"radius": null}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfigPatch {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_preset: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub radius: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub dark_mode: Option<Option<bool>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub font: Option<Option<String>>,
    /// Keys outside the known theme axes
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl ThemeConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that sets every field of `config` (nulls included)
    pub fn from_config(config: &ThemeConfig) -> Self {
        ThemeConfigPatch {
            color_preset: Some(config.color_preset.clone()),
            radius: Some(config.radius.clone()),
            dark_mode: Some(config.dark_mode),
            font: Some(config.font.clone()),
            other: BTreeMap::new(),
        }
    }

    pub fn color_preset(mut self, value: impl Into<String>) -> Self {
        self.color_preset = Some(Some(value.into()));
        self
    }

    pub fn radius(mut self, value: impl Into<String>) -> Self {
        self.radius = Some(Some(value.into()));
        self
    }

    pub fn dark_mode(mut self, value: bool) -> Self {
        self.dark_mode = Some(Some(value));
        self
    }

    pub fn font(mut self, value: impl Into<String>) -> Self {
        self.font = Some(Some(value.into()));
        self
    }

    pub fn clear_color_preset(mut self) -> Self {
        self.color_preset = Some(None);
        self
    }

    pub fn clear_radius(mut self) -> Self {
        self.radius = Some(None);
        self
    }

    pub fn clear_dark_mode(mut self) -> Self {
        self.dark_mode = Some(None);
        self
    }

    pub fn clear_font(mut self) -> Self {
        self.font = Some(None);
        self
    }

    pub fn other(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.other.insert(key.into(), value);
        self
    }

    /// Every field this patch touches, known axes first
    pub fn touched_fields(&self) -> Vec<ThemeField> {
        let mut fields = Vec::new();
        if self.color_preset.is_some() {
            fields.push(ThemeField::ColorPreset);
        }
        if self.radius.is_some() {
            fields.push(ThemeField::Radius);
        }
        if self.dark_mode.is_some() {
            fields.push(ThemeField::DarkMode);
        }
        if self.font.is_some() {
            fields.push(ThemeField::Font);
        }
        fields.extend(self.other.keys().cloned().map(ThemeField::Other));
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }
}
