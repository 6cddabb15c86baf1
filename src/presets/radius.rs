//! Border radius steps

use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadiusPreset {
    pub name: String,
    pub label: String,
    pub value: String,
}

const RADII: &[(&str, &str, &str)] = &[
    ("none", "None", "0rem"),
    ("sm", "SM", "0.3rem"),
    ("md", "MD", "0.5rem"),
    ("lg", "LG", "0.625rem"),
    ("xl", "XL", "0.75rem"),
    ("full", "Full", "1rem"),
];

#[derive(Debug, Clone, Default)]
pub struct RadiusCatalog {
    presets: Vec<RadiusPreset>,
}

static BUILTIN_RADII: OnceLock<RadiusCatalog> = OnceLock::new();

impl RadiusCatalog {
    pub fn builtin() -> &'static RadiusCatalog {
        BUILTIN_RADII.get_or_init(|| RadiusCatalog {
            presets: RADII
                .iter()
                .map(|(name, label, value)| RadiusPreset {
                    name: name.to_string(),
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&RadiusPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Accepts either a preset name (`lg`) or a raw CSS length (`0.625rem`)
    pub fn resolve<'a>(&'a self, name_or_value: &'a str) -> &'a str {
        match self.get(name_or_value) {
            Some(preset) => preset.value.as_str(),
            None => name_or_value,
        }
    }

    pub fn all(&self) -> &[RadiusPreset] {
        &self.presets
    }
}
