//! Link-definition extraction and resolution
//!
//! A link definition is a `link_def` child of the document:
//! `[key] <url>` at block start. Resolution collects the definitions into a
//! key → URL mapping and rewrites every `link` element in the tree to an
//! `a` element carrying an `href` attribute.

use std::collections::HashMap;

use crate::ast::{Element, Node};
use crate::error::Error;

/// Collect key → URL from the document's top-level `link_def` children.
pub fn link_defs(doc: &Element) -> HashMap<String, String> {
    let mut defs = HashMap::new();
    for child in doc.child_elements() {
        if child.tag == "link_def" {
            if let Some((key, url)) = def_entry(child) {
                defs.insert(key, url);
            }
        }
    }
    defs
}

fn def_entry(def: &Element) -> Option<(String, String)> {
    let mut key = None;
    let mut url = None;
    for child in def.child_elements() {
        match child.tag.as_str() {
            "link" => key = Some(child.text()),
            "url" => url = Some(child.text()),
            _ => {}
        }
    }
    Some((key?, url?))
}

/// Like [`link_defs`], but also removes the `link_def` children.
pub fn take_link_defs(doc: &mut Element) -> HashMap<String, String> {
    let defs = link_defs(doc);
    doc.children
        .retain(|child| !matches!(child, Node::Element(el) if el.tag == "link_def"));
    defs
}

/// Remove and return the link's `key` child text; a link without an
/// explicit key uses its own concatenated text.
pub fn take_link_key(link: &mut Element) -> String {
    let key_index = link
        .children
        .iter()
        .position(|child| matches!(child, Node::Element(el) if el.tag == "key"));
    if let Some(index) = key_index {
        if let Node::Element(key) = link.children.remove(index) {
            return key.text();
        }
    }
    link.text()
}

/// Extract the document's link definitions and substitute every `link`
/// element with an `a` element pointing at the defined URL.
pub fn resolve_links(doc: &mut Element) -> Result<(), Error> {
    let defs = take_link_defs(doc);
    resolve_in(doc, &defs)
}

fn resolve_in(element: &mut Element, defs: &HashMap<String, String>) -> Result<(), Error> {
    for child in element.children.iter_mut() {
        if let Node::Element(child) = child {
            if child.tag == "link" {
                let key = take_link_key(child);
                let url = defs
                    .get(&key)
                    .ok_or(Error::UnresolvedLink { key: key.clone() })?;
                child.tag = "a".to_string();
                child.set_attr("href", url);
            }
            resolve_in(child, defs)?;
        }
    }
    Ok(())
}
