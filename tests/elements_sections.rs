//! Named sections: `## name` … `##.`

use vellum::parse;
use vellum::testing::{body, elem, text};

#[test]
fn test_basic_section() {
    let doc = parse("## intro\n\nHello\n\n##.\n\nBye\n").unwrap();
    assert_eq!(
        doc,
        body(vec![
            elem("intro", vec![elem("p", vec![text("Hello")])]),
            elem("p", vec![text("Bye")]),
        ])
    );
}

#[test]
fn test_section_name_may_contain_spaces() {
    let doc = parse("## getting started\n\nx\n\n##.\n\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem("getting started", vec![elem("p", vec![text("x")])])])
    );
}

#[test]
fn test_nested_sections() {
    let doc = parse("## a\n\n## b\n\nx\n\n##.\n\n##.\n\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "a",
            vec![elem("b", vec![elem("p", vec![text("x")])])]
        )])
    );
}

#[test]
fn test_section_with_several_blocks() {
    let doc = parse("## s\n\n* T\n\nbody\n\n##.\n\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "s",
            vec![elem("h1", vec![text("T")]), elem("p", vec![text("body")])]
        )])
    );
}

#[test]
fn test_unclosed_section_closes_at_end_of_input() {
    let doc = parse("## s\n\nx\n").unwrap();
    assert_eq!(doc, body(vec![elem("s", vec![elem("p", vec![text("x")])])]));
}

#[test]
fn test_indented_list_inside_section() {
    let doc = parse("## s\n\n  # one\n\n##.\n\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "s",
            vec![elem("ol", vec![elem("li", vec![elem("p", vec![text("one")])])])]
        )])
    );
}

#[test]
fn test_ordered_list_opens_inside_section_body() {
    // `# ` inside a section is an ordered list, not a section marker; it
    // runs to end of input here, so the section closes with it
    let doc = parse("## s\n\n# one\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "s",
            vec![elem("ol", vec![elem("li", vec![elem("p", vec![text("one")])])])]
        )])
    );
}

#[test]
fn test_section_heading_needs_blank_line() {
    assert!(parse("## s\nno blank\n").is_err());
}

#[test]
fn test_hash_without_space_or_hash_is_an_error() {
    assert!(parse("##x\n\n").is_err());
    assert!(parse("#x\n\n").is_err());
}

#[test]
fn test_section_end_needs_blank_line() {
    assert!(parse("## s\n\nx\n\n##.\nmore\n").is_err());
}
