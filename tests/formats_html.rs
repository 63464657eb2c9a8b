//! End-to-end HTML rendering

use vellum::{parse, resolve_links, to_html, HtmlOptions, Markup};

#[test]
fn test_full_pipeline() {
    let source = "* Title\n\nVisit [Home|home] today.\n\n[home] <http://h>\n\n";
    let mut doc = parse(source).unwrap();
    resolve_links(&mut doc).unwrap();
    let html = to_html(&doc, &HtmlOptions::default());
    assert!(html.contains("<h1>Title</h1>"), "html was: {}", html);
    assert!(
        html.contains("<p>Visit <a href=\"http://h\">Home</a> today.</p>"),
        "html was: {}",
        html
    );
}

#[test]
fn test_blockquote_and_verbatim_render() {
    let doc = parse("  quoted\n\n   let x = 1;\n").unwrap();
    let html = to_html(&doc, &HtmlOptions::default());
    assert!(html.contains("<blockquote>\n<p>quoted</p>"), "html was: {}", html);
    assert!(html.contains("<pre>let x = 1;</pre>"), "html was: {}", html);
}

#[test]
fn test_lists_render() {
    let doc = parse("- one\n- two\n").unwrap();
    let html = to_html(&doc, &HtmlOptions::default());
    assert!(html.contains("<ul>"), "html was: {}", html);
    assert!(html.contains("<li>\n<p>one</p>"), "html was: {}", html);
}

#[test]
fn test_subdocument_renders_as_div() {
    let markup = Markup::new().with_subdocs(["note"]);
    let doc = markup.parse("Read \\note{Careful now.} twice").unwrap();
    let options = HtmlOptions::default().with_divs(["note"]);
    let html = to_html(&doc, &options);
    assert!(
        html.contains("<div class=\"note\">\n<p>Careful now.</p>"),
        "html was: {}",
        html
    );
}

#[test]
fn test_inline_tag_renders_as_span() {
    let doc = parse("a \\em{b} c").unwrap();
    let options = HtmlOptions::default().with_spans(["em"]);
    let html = to_html(&doc, &options);
    assert!(
        html.contains("<p>a <span class=\"em\">b</span> c</p>"),
        "html was: {}",
        html
    );
}

#[test]
fn test_text_is_escaped() {
    let doc = parse("a \\< b \\| c & d").unwrap();
    let html = to_html(&doc, &HtmlOptions::default());
    assert!(html.contains("a &lt; b | c &amp; d"), "html was: {}", html);
}
