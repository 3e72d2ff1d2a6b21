//! SVG document model shared by the build-time transformer and the runtime registry.
//!
//! # Modules
//!
//! - [`parse`]: quick-xml based parser (text → [`SvgDocument`])
//! - [`serialize`]: markup writer (outer/inner markup)
//! - [`normalize`]: colorless paint rewrite
//! - [`identity`]: content identity hash
//! - [`optimize`]: optional optimizer pre-pass
//!
//! # Pipeline
//!
//! ```text
//! svg text
//!     │
//!     ▼
//! ┌───────┐    ┌───────────┐    ┌───────────┐
//! │ parse │ ─► │ normalize │ ─► │ serialize │ ─► markup / DOM import
//! └───────┘    └───────────┘    └───────────┘
//!     ▲
//!     └── identity(text, colorless) keys both caches
//! ```

pub mod identity;
pub mod normalize;
pub mod optimize;
pub mod parse;
mod serialize;

pub use identity::{ContentIdentity, identity, scope_id};
pub use normalize::normalize;
pub use optimize::{OptimizeMode, Optimizer};
pub use parse::{ParseError, ensure_namespace, parse};

/// Root attributes never carried over to symbols, inline fragments or wrappers.
pub const SIZE_ATTRS: [&str; 2] = ["width", "height"];

/// A parsed SVG document rooted at a single `svg` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    pub root: Element,
}

impl SvgDocument {
    /// Root attributes with `width`/`height` removed.
    pub fn retained_attrs(&self) -> Attributes {
        self.root.attrs.without(&SIZE_ATTRS)
    }
}

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text kept in escaped form, written back verbatim.
    Text(String),
    CData(String),
    Comment(String),
}

/// An element with ordered attributes and child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attributes::default(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[inline]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Iterate over element children only (text and comments skipped).
    pub fn element_children(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(elem) => Some(elem),
            _ => None,
        })
    }

    /// Find the first element (self included) with the given tag, in document order.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        let mut stack = vec![self];
        while let Some(elem) = stack.pop() {
            if elem.is_tag(tag) {
                return Some(elem);
            }
            stack.extend(elem.element_children().rev());
        }
        None
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(elem)
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Insertion-ordered attribute list.
///
/// Icons carry a handful of attributes, so a `Vec` beats a map here and keeps
/// source order stable for serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    /// Replace an existing value in place, or append.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.remove(pos).1)
    }

    /// Copy of this list without the given names.
    pub fn without(&self, excluded: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(key, _)| !excluded.contains(&key.as_str()))
                .cloned()
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

/// Serialized as an object, preserving order.
impl serde::Serialize for Attributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_set_replaces_in_place() {
        let mut attrs: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        attrs.set("a", "3");
        let order: Vec<_> = attrs.iter().collect();
        assert_eq!(order, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_attributes_without() {
        let attrs: Attributes = [("width", "24"), ("viewBox", "0 0 24 24"), ("height", "24")]
            .into_iter()
            .collect();
        let kept = attrs.without(&SIZE_ATTRS);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.get("viewBox"), Some("0 0 24 24"));
        assert!(!kept.contains("width"));
    }

    #[test]
    fn test_attributes_serialize_as_object() {
        let attrs: Attributes = [("viewBox", "0 0 1 1"), ("fill", "none")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"viewBox":"0 0 1 1","fill":"none"}"#);
    }

    #[test]
    fn test_find_in_document_order() {
        let tree = Element::new("div")
            .with_child(Element::new("span").with_child(Element::new("svg").with_attr("id", "a")))
            .with_child(Element::new("svg").with_attr("id", "b"));
        assert_eq!(tree.find("svg").and_then(|e| e.attrs.get("id")), Some("a"));
        assert!(tree.find("mask").is_none());
    }
}
