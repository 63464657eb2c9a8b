//! The public element tree
//!
//! An element is a tag, an (almost always empty) attribute list, and an
//! ordered sequence of children, each either a string or another element.
//! The serialization convention is an s-expression-like array,
//! `[tag, child, child, …]`; when attributes are present they appear as an
//! object right after the tag:
//!
//! ```text
//! ["body", ["p", ["a", {"href": "http://x"}, "Foo"]]]
//! ```

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

use crate::error::Error;

/// An interior node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// A child of an element: a string leaf or a nested element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Concatenated text content of the whole subtree
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.attrs.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Child elements, skipping string leaves
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// The array form of this element
    pub fn to_value(&self) -> Value {
        let mut items = Vec::with_capacity(1 + self.children.len());
        items.push(Value::String(self.tag.clone()));
        if !self.attrs.is_empty() {
            let map: serde_json::Map<String, Value> = self
                .attrs
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect();
            items.push(Value::Object(map));
        }
        for child in &self.children {
            items.push(match child {
                Node::Text(text) => Value::String(text.clone()),
                Node::Element(element) => element.to_value(),
            });
        }
        Value::Array(items)
    }

    /// Rebuild an element from its array form
    pub fn from_value(value: &Value) -> Result<Element, Error> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::value("expected an array"))?;
        let tag = items
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| Error::value("expected a tag string first"))?;
        let mut element = Element::new(tag);
        let mut rest = &items[1..];
        if let Some(Value::Object(map)) = rest.first() {
            for (key, value) in map {
                let value = value
                    .as_str()
                    .ok_or_else(|| Error::value("attribute values must be strings"))?;
                element.attrs.push((key.clone(), value.to_string()));
            }
            rest = &rest[1..];
        }
        for item in rest {
            match item {
                Value::String(text) => element.children.push(Node::Text(text.clone())),
                Value::Array(_) => element
                    .children
                    .push(Node::Element(Element::from_value(item)?)),
                _ => return Err(Error::value("children must be strings or arrays")),
            }
        }
        Ok(element)
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attrs = usize::from(!self.attrs.is_empty());
        let mut seq = serializer.serialize_seq(Some(1 + attrs + self.children.len()))?;
        seq.serialize_element(&self.tag)?;
        if !self.attrs.is_empty() {
            let map: std::collections::BTreeMap<&str, &str> = self
                .attrs
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            seq.serialize_element(&map)?;
        }
        for child in &self.children {
            seq.serialize_element(child)?;
        }
        seq.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Text(text) => serializer.serialize_str(text),
            Node::Element(element) => element.serialize(serializer),
        }
    }
}
