//! # vellum
//!
//! A parser for the vellum format: a lightweight, indentation-sensitive
//! plain-text markup language. Parsing runs as a three-stage pipeline:
//!
//! 1. [`lexer::TextCleaner`] normalizes the character stream (tab expansion,
//!    CR/CRLF to LF, per-line right-trimming) and tags every character with
//!    its line/column position.
//! 2. [`lexer::Tokenizer`] turns cleaned characters into semantic tokens:
//!    newline and blank-line separators plus open/close tokens for the
//!    indentation-driven block structure (blockquotes and verbatim blocks).
//! 3. The [`parser::Markup`] controller drives a stack of small cooperating
//!    parser states over the token stream, building a tree of tagged
//!    [`Element`]s.
//!
//! Link definitions (`[key] <url>` at block start) are resolved in a
//! post-pass with [`resolve_links`], and the finished tree can be walked
//! with a [`Visitor`] — for example the HTML renderer in [`formats`].
//!
//! ```
//! let doc = vellum::parse("* Title\n\nSome body text.\n").unwrap();
//! assert_eq!(doc.tag, "body");
//! assert_eq!(doc.children.len(), 2);
//! ```

pub mod ast;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod testing;

pub use ast::{link_defs, resolve_links, take_link_defs, take_link_key, Element, Node, Visitor};
pub use error::Error;
pub use formats::{to_html, HtmlOptions};
pub use lexer::Position;
pub use parser::Markup;

/// Parse a document with default options (no subdocument tags, tabwidth 8).
pub fn parse(source: &str) -> Result<Element, Error> {
    Markup::new().parse(source)
}
