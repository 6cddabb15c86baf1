//! DOM surface of the target page
//!
//! The receiver and the devtools panel only ever touch three things:
//! - inline style properties on the root element (`documentElement.style`)
//! - the root element's class list
//! - `<style>` / `<link>` children of `<head>`, addressed by element id
//!
//! `Document` captures exactly that surface so the styling procedures in
//! `applier` are the same code regardless of what hosts the page.
//!
//! # Module Structure
//!
//! - `memory` - `MemoryDocument`, a self-contained document model
//! - `applier` - `StyleApplier`, the idempotent styling procedures

mod applier;
mod memory;

pub use applier::{StyleApplier, StyleRegistry, TRUSTED_FONT_HOST};
pub use memory::{HeadElement, MemoryDocument};

use serde::{Deserialize, Serialize};

/// Inline style priority (`element.style.setProperty(name, value, "important")`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Important,
}

/// Tag of an element found in `<head>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementTag {
    Style,
    Link,
    Other(String),
}

impl ElementTag {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "style" => ElementTag::Style,
            "link" => ElementTag::Link,
            other => ElementTag::Other(other.to_string()),
        }
    }
}

/// The parts of a document the theme procedures mutate
pub trait Document {
    fn set_root_property(&mut self, name: &str, value: &str, priority: Priority);
    fn remove_root_property(&mut self, name: &str);
    fn root_property(&self, name: &str) -> Option<String>;

    fn add_root_class(&mut self, class: &str);
    fn remove_root_class(&mut self, class: &str);
    fn has_root_class(&self, class: &str) -> bool;

    /// Tag of the first element with this id, if any
    fn element_tag(&self, id: &str) -> Option<ElementTag>;
    /// Remove the first element with this id; true if one was removed
    fn remove_element(&mut self, id: &str) -> bool;
    /// Ids of every element currently in `<head>`
    fn head_element_ids(&self) -> Vec<String>;

    fn append_style(&mut self, id: &str);
    /// Replace the text content of the `<style>` element with this id
    fn set_style_text(&mut self, id: &str, text: &str);
    fn style_text(&self, id: &str) -> Option<String>;

    fn append_stylesheet_link(&mut self, id: &str, href: &str);
}
