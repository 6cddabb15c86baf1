//! Color presets compatible with shadcn/ui
//!
//! Every preset shares the neutral base palette and overrides `primary`,
//! `primary-foreground` and `destructive` per mode.

use serde::Serialize;
use std::sync::OnceLock;

use crate::protocol::{CssVars, ModeCssVars};

/// Fallback when a color preset id doesn't resolve
pub const DEFAULT_COLOR_PRESET: &str = "neutral";

const NEUTRAL_LIGHT: &[(&str, &str)] = &[
    ("background", "oklch(1 0 0)"),
    ("foreground", "oklch(0.145 0 0)"),
    ("card", "oklch(1 0 0)"),
    ("card-foreground", "oklch(0.145 0 0)"),
    ("popover", "oklch(1 0 0)"),
    ("popover-foreground", "oklch(0.145 0 0)"),
    ("secondary", "oklch(0.97 0 0)"),
    ("secondary-foreground", "oklch(0.205 0 0)"),
    ("muted", "oklch(0.97 0 0)"),
    ("muted-foreground", "oklch(0.556 0 0)"),
    ("accent", "oklch(0.97 0 0)"),
    ("accent-foreground", "oklch(0.205 0 0)"),
    ("border", "oklch(0.922 0 0)"),
    ("input", "oklch(0.922 0 0)"),
    ("ring", "oklch(0.708 0 0)"),
];

const NEUTRAL_DARK: &[(&str, &str)] = &[
    ("background", "oklch(0.145 0 0)"),
    ("foreground", "oklch(0.985 0 0)"),
    ("card", "oklch(0.205 0 0)"),
    ("card-foreground", "oklch(0.985 0 0)"),
    ("popover", "oklch(0.205 0 0)"),
    ("popover-foreground", "oklch(0.985 0 0)"),
    ("secondary", "oklch(0.269 0 0)"),
    ("secondary-foreground", "oklch(0.985 0 0)"),
    ("muted", "oklch(0.269 0 0)"),
    ("muted-foreground", "oklch(0.708 0 0)"),
    ("accent", "oklch(0.269 0 0)"),
    ("accent-foreground", "oklch(0.985 0 0)"),
    ("border", "oklch(1 0 0 / 10%)"),
    ("input", "oklch(1 0 0 / 15%)"),
    ("ring", "oklch(0.556 0 0)"),
];

const DEFAULT_DESTRUCTIVE: (&str, &str) = ("oklch(0.577 0.245 27.325)", "oklch(0.704 0.191 22.216)");

/// (light, dark) pair
type Pair = (&'static str, &'static str);

struct PresetSpec {
    name: &'static str,
    label: &'static str,
    primary: Pair,
    primary_foreground: Pair,
    destructive_light: Option<&'static str>,
}

const SPECS: &[PresetSpec] = &[
    PresetSpec {
        name: "neutral",
        label: "Neutral",
        primary: ("oklch(0.556 0 0)", "oklch(0.708 0 0)"),
        primary_foreground: ("oklch(0.985 0 0)", "oklch(0.205 0 0)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "red",
        label: "Red",
        primary: ("oklch(0.577 0.245 27.325)", "oklch(0.637 0.237 25.331)"),
        primary_foreground: ("oklch(0.971 0.013 17.38)", "oklch(0.971 0.013 17.38)"),
        destructive_light: Some("oklch(0.505 0.213 27.518)"),
    },
    PresetSpec {
        name: "orange",
        label: "Orange",
        primary: ("oklch(0.646 0.222 41.116)", "oklch(0.705 0.213 47.604)"),
        primary_foreground: ("oklch(0.98 0.016 73.684)", "oklch(0.98 0.016 73.684)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "amber",
        label: "Amber",
        primary: ("oklch(0.67 0.16 58)", "oklch(0.77 0.16 70)"),
        primary_foreground: ("oklch(0.99 0.02 95)", "oklch(0.28 0.07 46)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "yellow",
        label: "Yellow",
        primary: ("oklch(0.852 0.199 91.936)", "oklch(0.795 0.184 86.047)"),
        primary_foreground: ("oklch(0.421 0.095 57.708)", "oklch(0.421 0.095 57.708)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "lime",
        label: "Lime",
        primary: ("oklch(0.65 0.18 132)", "oklch(0.77 0.20 131)"),
        primary_foreground: ("oklch(0.99 0.03 121)", "oklch(0.27 0.07 132)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "green",
        label: "Green",
        primary: ("oklch(0.648 0.2 131.684)", "oklch(0.648 0.2 131.684)"),
        primary_foreground: ("oklch(0.986 0.031 120.757)", "oklch(0.986 0.031 120.757)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "emerald",
        label: "Emerald",
        primary: ("oklch(0.60 0.13 163)", "oklch(0.70 0.15 162)"),
        primary_foreground: ("oklch(0.98 0.02 166)", "oklch(0.26 0.05 173)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "teal",
        label: "Teal",
        primary: ("oklch(0.60 0.10 185)", "oklch(0.70 0.12 183)"),
        primary_foreground: ("oklch(0.98 0.01 181)", "oklch(0.28 0.04 193)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "cyan",
        label: "Cyan",
        primary: ("oklch(0.61 0.11 222)", "oklch(0.71 0.13 215)"),
        primary_foreground: ("oklch(0.98 0.02 201)", "oklch(0.30 0.05 230)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "sky",
        label: "Sky",
        primary: ("oklch(0.59 0.14 242)", "oklch(0.68 0.15 237)"),
        primary_foreground: ("oklch(0.98 0.01 237)", "oklch(0.29 0.06 243)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "blue",
        label: "Blue",
        primary: ("oklch(0.488 0.243 264.376)", "oklch(0.42 0.18 266)"),
        primary_foreground: ("oklch(0.97 0.014 254.604)", "oklch(0.97 0.014 254.604)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "indigo",
        label: "Indigo",
        primary: ("oklch(0.51 0.23 277)", "oklch(0.59 0.20 277)"),
        primary_foreground: ("oklch(0.96 0.02 272)", "oklch(0.96 0.02 272)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "violet",
        label: "Violet",
        primary: ("oklch(0.541 0.281 293.009)", "oklch(0.606 0.25 292.717)"),
        primary_foreground: ("oklch(0.969 0.016 293.756)", "oklch(0.969 0.016 293.756)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "purple",
        label: "Purple",
        primary: ("oklch(0.56 0.25 302)", "oklch(0.63 0.23 304)"),
        primary_foreground: ("oklch(0.98 0.01 308)", "oklch(0.98 0.01 308)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "fuchsia",
        label: "Fuchsia",
        primary: ("oklch(0.59 0.26 323)", "oklch(0.67 0.26 322)"),
        primary_foreground: ("oklch(0.98 0.02 320)", "oklch(0.98 0.02 320)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "pink",
        label: "Pink",
        primary: ("oklch(0.59 0.22 1)", "oklch(0.66 0.21 354)"),
        primary_foreground: ("oklch(0.97 0.01 343)", "oklch(0.97 0.01 343)"),
        destructive_light: None,
    },
    PresetSpec {
        name: "rose",
        label: "Rose",
        primary: ("oklch(0.586 0.253 17.585)", "oklch(0.645 0.246 16.439)"),
        primary_foreground: ("oklch(0.969 0.015 12.422)", "oklch(0.969 0.015 12.422)"),
        destructive_light: None,
    },
];

/// A named palette with resolved variables for both modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPreset {
    pub name: String,
    pub label: String,
    pub colors: ModeCssVars,
}

fn mode_vars(base: &[(&str, &str)], primary: &str, foreground: &str, destructive: &str) -> CssVars {
    let mut vars: CssVars = base
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.insert("primary".into(), primary.into());
    vars.insert("primary-foreground".into(), foreground.into());
    vars.insert("destructive".into(), destructive.into());
    vars
}

impl ColorPreset {
    fn from_spec(spec: &PresetSpec) -> Self {
        let light = mode_vars(
            NEUTRAL_LIGHT,
            spec.primary.0,
            spec.primary_foreground.0,
            spec.destructive_light.unwrap_or(DEFAULT_DESTRUCTIVE.0),
        );
        let dark = mode_vars(
            NEUTRAL_DARK,
            spec.primary.1,
            spec.primary_foreground.1,
            DEFAULT_DESTRUCTIVE.1,
        );
        ColorPreset {
            name: spec.name.into(),
            label: spec.label.into(),
            colors: ModeCssVars { light, dark },
        }
    }

    /// Variables for one mode
    pub fn vars(&self, dark: bool) -> &CssVars {
        if dark {
            &self.colors.dark
        } else {
            &self.colors.light
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorCatalog {
    presets: Vec<ColorPreset>,
}

static BUILTIN_COLORS: OnceLock<ColorCatalog> = OnceLock::new();

impl ColorCatalog {
    pub fn new(presets: Vec<ColorPreset>) -> Self {
        ColorCatalog { presets }
    }

    pub fn builtin() -> &'static ColorCatalog {
        BUILTIN_COLORS.get_or_init(|| ColorCatalog {
            presets: SPECS.iter().map(ColorPreset::from_spec).collect(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&ColorPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn all(&self) -> &[ColorPreset] {
        &self.presets
    }
}
