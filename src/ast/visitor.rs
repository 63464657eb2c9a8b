//! Pre-order tree walk for renderers

use crate::ast::{Element, Node};

/// Callbacks a renderer implements; see [`Element::walk`].
pub trait Visitor {
    fn open_tag(&mut self, tag: &str, attrs: &[(String, String)]);
    fn text(&mut self, text: &str);
    fn close_tag(&mut self, tag: &str);
}

impl Element {
    /// Walk the subtree in document order: `open_tag`, children, `close_tag`;
    /// string leaves invoke `text`.
    pub fn walk<V: Visitor>(&self, visitor: &mut V) {
        visitor.open_tag(&self.tag, &self.attrs);
        for child in &self.children {
            match child {
                Node::Text(text) => visitor.text(text),
                Node::Element(element) => element.walk(visitor),
            }
        }
        visitor.close_tag(&self.tag);
    }
}
