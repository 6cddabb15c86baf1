//! CSS generation from theme config
//!
//! - `resolved_css_vars` - current-mode variables for `APPLY_THEME`
//! - `both_mode_color_vars` - light + dark sets for `UPDATE_COLORS`
//! - `export_css` - shadcn/ui `globals.css` block for copy/paste

use tracing::warn;

use super::config::ThemeConfig;
use crate::presets::{ColorCatalog, ColorPreset, DEFAULT_COLOR_PRESET};
use crate::protocol::{CssVars, ModeCssVars};

/// Radius written to exported CSS when the config has none
pub const DEFAULT_EXPORT_RADIUS: &str = "0.5rem";

/// `--key: value;` pairs joined by single spaces (inline stylesheet body)
pub fn serialize_css_vars(vars: &CssVars) -> String {
    vars.iter()
        .map(|(key, value)| format!("--{}: {};", key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a color preset id, falling back to the default palette
///
/// Returns `None` only when neither the id nor the fallback exist.
pub fn resolve_color_preset<'a>(catalog: &'a ColorCatalog, name: &str) -> Option<&'a ColorPreset> {
    if let Some(preset) = catalog.get(name) {
        return Some(preset);
    }
    warn!(
        color_preset = %name,
        fallback = DEFAULT_COLOR_PRESET,
        "Unknown color preset, falling back to default"
    );
    catalog.get(DEFAULT_COLOR_PRESET)
}

/// Variables for the config's current mode, plus `radius` when set
///
/// Dark mode is only used when explicitly `Some(true)`.
pub fn resolved_css_vars(config: &ThemeConfig, catalog: &ColorCatalog) -> CssVars {
    let mut vars = CssVars::new();
    if let Some(name) = &config.color_preset {
        if let Some(preset) = resolve_color_preset(catalog, name) {
            vars.extend(
                preset
                    .vars(config.dark_mode == Some(true))
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }
    }
    if let Some(radius) = &config.radius {
        vars.insert("radius".into(), radius.clone());
    }
    vars
}

pub fn both_mode_color_vars(preset: &ColorPreset) -> ModeCssVars {
    preset.colors.clone()
}

fn format_css_block(selector: &str, vars: &CssVars) -> String {
    let body = vars
        .iter()
        .map(|(key, value)| format!("  --{}: {};", key, value))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{} {{\n{}\n}}", selector, body)
}

/// Generate a shadcn/ui-compatible CSS export
///
/// Returns `None` when no color preset resolves (nothing to export).
pub fn export_css(config: &ThemeConfig, catalog: &ColorCatalog) -> Option<String> {
    let preset = catalog.get(config.color_preset.as_deref()?)?;
    let radius = config.radius.as_deref().unwrap_or(DEFAULT_EXPORT_RADIUS);

    let mut light = CssVars::new();
    light.insert("radius".into(), radius.to_string());
    light.extend(
        preset
            .colors
            .light
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );

    Some(format!(
        "{}\n\n{}",
        format_css_block(":root", &light),
        format_css_block(".dark", &preset.colors.dark)
    ))
}
