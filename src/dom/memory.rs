//! In-memory document model
//!
//! Mirrors browser semantics closely enough for the theme procedures:
//! duplicate ids are possible (lookups return the first match), classes are
//! a de-duplicated ordered list, inline properties keep insertion order.

use indexmap::IndexMap;
use serde::Serialize;

use super::{Document, ElementTag, Priority};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadElement {
    pub id: String,
    pub tag: ElementTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineProperty {
    pub value: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryDocument {
    root_style: IndexMap<String, InlineProperty>,
    root_classes: Vec<String>,
    head: Vec<HeadElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an arbitrary element, e.g. a host-page node that collides with an injected id
    pub fn insert_element(&mut self, id: &str, tag: &str) {
        self.head.push(HeadElement {
            id: id.to_string(),
            tag: ElementTag::from_name(tag),
            href: None,
            text: String::new(),
        });
    }

    pub fn head(&self) -> &[HeadElement] {
        &self.head
    }

    pub fn root_classes(&self) -> &[String] {
        &self.root_classes
    }

    pub fn root_property_priority(&self, name: &str) -> Option<Priority> {
        self.root_style.get(name).map(|p| p.priority)
    }

    pub fn root_property_names(&self) -> Vec<String> {
        self.root_style.keys().cloned().collect()
    }

    /// Number of elements in `<head>` with this id
    pub fn count_elements(&self, id: &str) -> usize {
        self.head.iter().filter(|e| e.id == id).count()
    }

    pub fn link_href(&self, id: &str) -> Option<&str> {
        self.head
            .iter()
            .find(|e| e.id == id && e.tag == ElementTag::Link)
            .and_then(|e| e.href.as_deref())
    }

    fn first_mut(&mut self, id: &str) -> Option<&mut HeadElement> {
        self.head.iter_mut().find(|e| e.id == id)
    }
}

impl Document for MemoryDocument {
    fn set_root_property(&mut self, name: &str, value: &str, priority: Priority) {
        self.root_style.insert(
            name.to_string(),
            InlineProperty {
                value: value.to_string(),
                priority,
            },
        );
    }

    fn remove_root_property(&mut self, name: &str) {
        self.root_style.shift_remove(name);
    }

    fn root_property(&self, name: &str) -> Option<String> {
        self.root_style.get(name).map(|p| p.value.clone())
    }

    fn add_root_class(&mut self, class: &str) {
        if !self.has_root_class(class) {
            self.root_classes.push(class.to_string());
        }
    }

    fn remove_root_class(&mut self, class: &str) {
        self.root_classes.retain(|c| c != class);
    }

    fn has_root_class(&self, class: &str) -> bool {
        self.root_classes.iter().any(|c| c == class)
    }

    fn element_tag(&self, id: &str) -> Option<ElementTag> {
        self.head.iter().find(|e| e.id == id).map(|e| e.tag.clone())
    }

    fn remove_element(&mut self, id: &str) -> bool {
        match self.head.iter().position(|e| e.id == id) {
            Some(index) => {
                self.head.remove(index);
                true
            }
            None => false,
        }
    }

    fn head_element_ids(&self) -> Vec<String> {
        self.head.iter().map(|e| e.id.clone()).collect()
    }

    fn append_style(&mut self, id: &str) {
        self.head.push(HeadElement {
            id: id.to_string(),
            tag: ElementTag::Style,
            href: None,
            text: String::new(),
        });
    }

    fn set_style_text(&mut self, id: &str, text: &str) {
        if let Some(element) = self.first_mut(id) {
            if element.tag == ElementTag::Style {
                element.text = text.to_string();
            }
        }
    }

    fn style_text(&self, id: &str) -> Option<String> {
        self.head
            .iter()
            .find(|e| e.id == id && e.tag == ElementTag::Style)
            .map(|e| e.text.clone())
    }

    fn append_stylesheet_link(&mut self, id: &str, href: &str) {
        self.head.push(HeadElement {
            id: id.to_string(),
            tag: ElementTag::Link,
            href: Some(href.to_string()),
            text: String::new(),
        });
    }
}
