//! Output formats built on the visitor interface

pub mod html;

pub use html::{to_html, HtmlOptions};
