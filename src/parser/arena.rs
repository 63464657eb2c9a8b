//! Parse-time element storage
//!
//! During a parse the tree is an arena of nodes keyed by index; the element
//! stack holds ids, so parser states never alias into the tree. The arena
//! materializes into the public [`Element`] once parsing finishes.

use crate::ast::{Element, Node};

/// Index of an element in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ElementId(usize);

#[derive(Debug)]
enum Child {
    Text(String),
    Element(ElementId),
}

#[derive(Debug)]
struct Slot {
    tag: String,
    children: Vec<Child>,
}

#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.slots.len());
        self.slots.push(Slot {
            tag: tag.to_string(),
            children: Vec::new(),
        });
        id
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.slots[parent.0].children.push(Child::Element(child));
    }

    /// Append a character to an element's text, extending the last text
    /// child if there is one (adjacent strings stay coalesced).
    pub fn push_char(&mut self, id: ElementId, ch: char) {
        let children = &mut self.slots[id.0].children;
        if let Some(Child::Text(text)) = children.last_mut() {
            text.push(ch);
        } else {
            children.push(Child::Text(ch.to_string()));
        }
    }

    pub fn push_str(&mut self, id: ElementId, text: &str) {
        for ch in text.chars() {
            self.push_char(id, ch);
        }
    }

    pub fn retag(&mut self, id: ElementId, tag: &str) {
        self.slots[id.0].tag = tag.to_string();
    }

    /// Drop trailing spaces from the element's last text child; removes the
    /// child entirely if nothing remains. Used when a structural token ends
    /// a paragraph right after a line join.
    pub fn trim_trailing_spaces(&mut self, id: ElementId) {
        let children = &mut self.slots[id.0].children;
        if let Some(Child::Text(text)) = children.last_mut() {
            while text.ends_with(' ') {
                text.pop();
            }
            if text.is_empty() {
                children.pop();
            }
        }
    }

    /// Materialize the subtree rooted at `id` into the public tree type.
    pub fn take(&mut self, id: ElementId) -> Element {
        let tag = std::mem::take(&mut self.slots[id.0].tag);
        let children = std::mem::take(&mut self.slots[id.0].children);
        let mut element = Element::new(tag);
        for child in children {
            match child {
                Child::Text(text) => element.children.push(Node::Text(text)),
                Child::Element(child_id) => {
                    element.children.push(Node::Element(self.take(child_id)))
                }
            }
        }
        element
    }
}
