//! Links, link definitions, and resolution

use vellum::testing::{body, elem, element, text};
use vellum::{link_defs, parse, resolve_links, Node};

#[test]
fn test_link_inside_paragraph() {
    let doc = parse("See [docs] here\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "p",
            vec![text("See "), elem("link", vec![text("docs")]), text(" here")]
        )])
    );
}

#[test]
fn test_block_start_link_becomes_paragraph() {
    let doc = parse("[Foo|foo]\n\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "p",
            vec![elem("link", vec![text("Foo"), elem("key", vec![text("foo")])])]
        )])
    );
}

#[test]
fn test_block_start_link_with_trailing_text() {
    let doc = parse("[Foo] bar\n\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "p",
            vec![elem("link", vec![text("Foo")]), text(" bar")]
        )])
    );
}

#[test]
fn test_link_definition_block() {
    let doc = parse("[foo] <http://x>\n\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "link_def",
            vec![
                elem("link", vec![text("foo")]),
                elem("url", vec![text("http://x")]),
            ]
        )])
    );
    let defs = link_defs(&doc);
    assert_eq!(defs["foo"], "http://x");
}

#[test]
fn test_link_resolution_round_trip() {
    let mut doc = parse("[Foo|foo]\n\n[foo] <http://x>\n\n").unwrap();
    resolve_links(&mut doc).unwrap();
    let mut anchor = element("a", vec![text("Foo")]);
    anchor.set_attr("href", "http://x");
    assert_eq!(doc, body(vec![elem("p", vec![Node::Element(anchor)])]));
}

#[test]
fn test_resolution_falls_back_to_link_text() {
    let mut doc = parse("x [Foo]\n\n[Foo] <http://y>\n\n").unwrap();
    resolve_links(&mut doc).unwrap();
    let mut anchor = element("a", vec![text("Foo")]);
    anchor.set_attr("href", "http://y");
    assert_eq!(
        doc,
        body(vec![elem("p", vec![text("x "), Node::Element(anchor)])])
    );
}

#[test]
fn test_multiple_definitions() {
    let doc = parse("[a] <http://a>\n\n[b] <http://b>\n\n").unwrap();
    let defs = link_defs(&doc);
    assert_eq!(defs.len(), 2);
    assert_eq!(defs["a"], "http://a");
    assert_eq!(defs["b"], "http://b");
}

#[test]
fn test_unresolved_link_is_an_error() {
    let mut doc = parse("[nope]\n\n").unwrap();
    assert!(resolve_links(&mut doc).is_err());
}

#[test]
fn test_link_spanning_lines_joins() {
    let doc = parse("pre [Foo\nBar] post\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "p",
            vec![
                text("pre "),
                elem("link", vec![text("Foo Bar")]),
                text(" post"),
            ]
        )])
    );
}

#[test]
fn test_escaped_bracket_inside_link() {
    let doc = parse("a [x\\]y] b\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "p",
            vec![text("a "), elem("link", vec![text("x]y")]), text(" b")]
        )])
    );
}

#[test]
fn test_unterminated_link_is_an_error() {
    assert!(parse("a [open\n\n").is_err());
}
