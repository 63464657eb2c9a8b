//! Factories for building expected element trees in tests
//!
//! ```
//! use vellum::testing::{body, elem, text};
//!
//! let expected = body(vec![elem("p", vec![text("abc")])]);
//! assert_eq!(vellum::parse("abc").unwrap(), expected);
//! ```

use crate::ast::{Element, Node};

/// An element node with the given children
pub fn elem(tag: &str, children: Vec<Node>) -> Node {
    Node::Element(element(tag, children))
}

/// An element value with the given children
pub fn element(tag: &str, children: Vec<Node>) -> Element {
    Element {
        tag: tag.to_string(),
        attrs: Vec::new(),
        children,
    }
}

/// A string leaf
pub fn text(s: &str) -> Node {
    Node::Text(s.to_string())
}

/// A document root
pub fn body(children: Vec<Node>) -> Element {
    element("body", children)
}
