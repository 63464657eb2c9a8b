//! The element tree and its post-parse operations
//!
//! - `element` — the public tree type and its serialized array form
//! - `links` — link-definition extraction and resolution
//! - `visitor` — the pre-order walk renderers build on

pub mod element;
pub mod links;
pub mod visitor;

pub use element::{Element, Node};
pub use links::{link_defs, resolve_links, take_link_defs, take_link_key};
pub use visitor::Visitor;
