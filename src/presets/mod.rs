//! Preset catalogs - color palettes, fonts and radius steps
//!
//! Pure lookup tables with a `name → record` contract. Lookups never fail
//! loudly; callers decide the fallback.
//!
//! # Module Structure
//!
//! - `colors` - shadcn/ui color presets (OKLCH), neutral base + primary accents
//! - `fonts` - Google Fonts presets
//! - `radius` - Border radius steps

mod colors;
mod fonts;
mod radius;

pub use colors::{ColorCatalog, ColorPreset, DEFAULT_COLOR_PRESET};
pub use fonts::{FontCatalog, FontPreset, DEFAULT_FONT};
pub use radius::{RadiusCatalog, RadiusPreset};

/// All catalogs the editor resolves identifiers against
#[derive(Debug, Clone)]
pub struct Presets {
    pub colors: ColorCatalog,
    pub fonts: FontCatalog,
    pub radii: RadiusCatalog,
}

impl Presets {
    pub fn builtin() -> Self {
        Presets {
            colors: ColorCatalog::builtin().clone(),
            fonts: FontCatalog::builtin().clone(),
            radii: RadiusCatalog::builtin().clone(),
        }
    }
}

impl Default for Presets {
    fn default() -> Self {
        Self::builtin()
    }
}
