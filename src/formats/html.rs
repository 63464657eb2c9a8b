//! HTML rendering
//!
//! A straightforward [`Visitor`] that serializes the element tree to HTML.
//! Per-tag policy is the renderer's, not the parser's: which tags are
//! block-level (surrounding newlines) and which are rewritten as
//! `<div class="tag">` or `<span class="tag">` wrappers.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::ast::{Element, Visitor};

static DEFAULT_BLOCK_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "body", "p", "blockquote", "pre", "ul", "ol", "li", "dl", "dt", "dd", "h1", "h2", "h3",
        "h4", "h5", "h6",
    ]
    .into_iter()
    .collect()
});

/// Per-tag rendering policy
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Tags that get surrounding newlines in the output
    pub block_elements: HashSet<String>,
    /// Tags rewritten as `<div class="tag">`
    pub divs: HashSet<String>,
    /// Tags rewritten as `<span class="tag">`
    pub spans: HashSet<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            block_elements: DEFAULT_BLOCK_ELEMENTS
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
            divs: HashSet::new(),
            spans: HashSet::new(),
        }
    }
}

impl HtmlOptions {
    pub fn with_divs<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.divs = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_spans<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spans = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Render an element tree to an HTML string.
pub fn to_html(doc: &Element, options: &HtmlOptions) -> String {
    let mut writer = HtmlWriter {
        options,
        out: String::new(),
    };
    doc.walk(&mut writer);
    writer.out
}

struct HtmlWriter<'a> {
    options: &'a HtmlOptions,
    out: String,
}

impl HtmlWriter<'_> {
    /// Tag name and class attribute after applying the div/span policy
    fn rewrite<'t>(&self, tag: &'t str) -> (&'t str, Option<&'t str>) {
        if self.options.divs.contains(tag) {
            ("div", Some(tag))
        } else if self.options.spans.contains(tag) {
            ("span", Some(tag))
        } else {
            (tag, None)
        }
    }

    fn break_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}

impl Visitor for HtmlWriter<'_> {
    fn open_tag(&mut self, tag: &str, attrs: &[(String, String)]) {
        if self.options.block_elements.contains(tag) {
            self.break_line();
        }
        let (name, class) = self.rewrite(tag);
        self.out.push('<');
        self.out.push_str(name);
        if let Some(class) = class {
            self.out.push_str(&format!(" class=\"{}\"", escape_html(class)));
        }
        for (key, value) in attrs {
            self.out.push_str(&format!(" {}=\"{}\"", key, escape_html(value)));
        }
        self.out.push('>');
    }

    fn text(&mut self, text: &str) {
        self.out.push_str(&escape_html(text));
    }

    fn close_tag(&mut self, tag: &str) {
        let (name, _) = self.rewrite(tag);
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
        if self.options.block_elements.contains(tag) {
            self.out.push('\n');
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{body, elem, text};

    #[test]
    fn test_renders_paragraphs() {
        let doc = body(vec![elem("p", vec![text("hi")])]);
        let html = to_html(&doc, &HtmlOptions::default());
        assert_eq!(html, "<body>\n<p>hi</p>\n</body>\n");
    }

    #[test]
    fn test_escapes_text() {
        let doc = body(vec![elem("p", vec![text("a < b & c \"d\"")])]);
        let html = to_html(&doc, &HtmlOptions::default());
        assert!(html.contains("a &lt; b &amp; c &quot;d&quot;"));
    }

    #[test]
    fn test_div_rewrite() {
        let doc = body(vec![elem("note", vec![text("x")])]);
        let options = HtmlOptions::default().with_divs(["note"]);
        let html = to_html(&doc, &options);
        assert!(html.contains("<div class=\"note\">x</div>"));
    }

    #[test]
    fn test_span_rewrite() {
        let doc = body(vec![elem("p", vec![elem("em", vec![text("x")])])]);
        let options = HtmlOptions::default().with_spans(["em"]);
        let html = to_html(&doc, &options);
        assert!(html.contains("<p><span class=\"em\">x</span></p>"));
    }

    #[test]
    fn test_attrs_render() {
        let mut a = crate::testing::element("a", vec![text("Foo")]);
        a.set_attr("href", "http://x");
        let doc = body(vec![elem("p", vec![crate::ast::Node::Element(a)])]);
        let html = to_html(&doc, &HtmlOptions::default());
        assert!(html.contains("<a href=\"http://x\">Foo</a>"));
    }

    #[test]
    fn test_inline_tags_have_no_newlines() {
        let doc = body(vec![elem("p", vec![text("a "), elem("em", vec![text("b")])])]);
        let html = to_html(&doc, &HtmlOptions::default());
        assert!(html.contains("<p>a <em>b</em></p>"));
    }
}
