//! Theme module - Editor-side theme state and CSS generation
//!
//! This module provides functionality for:
//! - The `ThemeConfig` owned by the config reducer (all fields nullable)
//! - Partial updates (`ThemeConfigPatch`) that distinguish "absent" from "null"
//! - Resolving config + presets into CSS variable sets
//! - CSS export in shadcn/ui `globals.css` format
//!
//! # Module Structure
//!
//! - `config` - ThemeConfig, ThemeConfigPatch, ThemeField
//! - `css` - Variable resolution, stylesheet serialization, export

mod config;
pub mod css;

pub use config::{ThemeConfig, ThemeConfigPatch, ThemeField};
pub use css::{export_css, resolved_css_vars, serialize_css_vars};

#[cfg(test)]
#[path = "theme_tests.rs"]
mod tests;
