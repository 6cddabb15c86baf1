//! Font presets (Google Fonts, loaded on demand by the receiver)

use serde::Serialize;
use std::sync::OnceLock;

/// Fallback when a font id doesn't resolve
pub const DEFAULT_FONT: &str = "inter";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontPreset {
    pub value: String,
    pub label: String,
    pub font_family: String,
    pub google_fonts_url: String,
}

const FONTS: &[(&str, &str, &str, &str)] = &[
    (
        "inter",
        "Inter",
        "\"Inter\", sans-serif",
        "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap",
    ),
    (
        "noto-sans",
        "Noto Sans",
        "\"Noto Sans\", sans-serif",
        "https://fonts.googleapis.com/css2?family=Noto+Sans:wght@400;500;600;700&display=swap",
    ),
    (
        "nunito-sans",
        "Nunito Sans",
        "\"Nunito Sans\", sans-serif",
        "https://fonts.googleapis.com/css2?family=Nunito+Sans:wght@400;500;600;700&display=swap",
    ),
    (
        "figtree",
        "Figtree",
        "\"Figtree\", sans-serif",
        "https://fonts.googleapis.com/css2?family=Figtree:wght@400;500;600;700&display=swap",
    ),
    (
        "roboto",
        "Roboto",
        "\"Roboto\", sans-serif",
        "https://fonts.googleapis.com/css2?family=Roboto:wght@400;500;700&display=swap",
    ),
    (
        "raleway",
        "Raleway",
        "\"Raleway\", sans-serif",
        "https://fonts.googleapis.com/css2?family=Raleway:wght@400;500;600;700&display=swap",
    ),
    (
        "dm-sans",
        "DM Sans",
        "\"DM Sans\", sans-serif",
        "https://fonts.googleapis.com/css2?family=DM+Sans:wght@400;500;600;700&display=swap",
    ),
    (
        "public-sans",
        "Public Sans",
        "\"Public Sans\", sans-serif",
        "https://fonts.googleapis.com/css2?family=Public+Sans:wght@400;500;600;700&display=swap",
    ),
    (
        "outfit",
        "Outfit",
        "\"Outfit\", sans-serif",
        "https://fonts.googleapis.com/css2?family=Outfit:wght@400;500;600;700&display=swap",
    ),
    (
        "jetbrains-mono",
        "JetBrains Mono",
        "\"JetBrains Mono\", monospace",
        "https://fonts.googleapis.com/css2?family=JetBrains+Mono:wght@400;500;600;700&display=swap",
    ),
];

#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    presets: Vec<FontPreset>,
}

static BUILTIN_FONTS: OnceLock<FontCatalog> = OnceLock::new();

impl FontCatalog {
    pub fn new(presets: Vec<FontPreset>) -> Self {
        FontCatalog { presets }
    }

    pub fn builtin() -> &'static FontCatalog {
        BUILTIN_FONTS.get_or_init(|| FontCatalog {
            presets: FONTS
                .iter()
                .map(|(value, label, family, url)| FontPreset {
                    value: value.to_string(),
                    label: label.to_string(),
                    font_family: family.to_string(),
                    google_fonts_url: url.to_string(),
                })
                .collect(),
        })
    }

    pub fn get(&self, value: &str) -> Option<&FontPreset> {
        self.presets.iter().find(|f| f.value == value)
    }

    pub fn all(&self) -> &[FontPreset] {
        &self.presets
    }
}
