//! Ordered, unordered, and definition lists

use vellum::parse;
use vellum::testing::{body, elem, text};

#[test]
fn test_top_level_unordered_list() {
    let doc = parse("- one\n- two\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "ul",
            vec![
                elem("li", vec![elem("p", vec![text("one")])]),
                elem("li", vec![elem("p", vec![text("two")])]),
            ]
        )])
    );
}

#[test]
fn test_top_level_ordered_list() {
    let doc = parse("# one\n# two\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "ol",
            vec![
                elem("li", vec![elem("p", vec![text("one")])]),
                elem("li", vec![elem("p", vec![text("two")])]),
            ]
        )])
    );
}

#[test]
fn test_indented_list() {
    let doc = parse("  - one\n  - two\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "ul",
            vec![
                elem("li", vec![elem("p", vec![text("one")])]),
                elem("li", vec![elem("p", vec![text("two")])]),
            ]
        )])
    );
}

#[test]
fn test_item_with_two_paragraphs() {
    let doc = parse("- a\n\n  b\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "ul",
            vec![elem(
                "li",
                vec![elem("p", vec![text("a")]), elem("p", vec![text("b")])]
            )]
        )])
    );
}

#[test]
fn test_nested_list() {
    // the nested list opens two columns past the item body
    let doc = parse("- a\n\n    - b\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "ul",
            vec![elem(
                "li",
                vec![
                    elem("p", vec![text("a")]),
                    elem("ul", vec![elem("li", vec![elem("p", vec![text("b")])])]),
                ]
            )]
        )])
    );
}

#[test]
fn test_item_body_wraps() {
    let doc = parse("- one\n  long\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "ul",
            vec![elem("li", vec![elem("p", vec![text("one long")])])]
        )])
    );
}

#[test]
fn test_list_inside_blockquote_after_paragraph() {
    let doc = parse("  text\n\n  - one\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "blockquote",
            vec![
                elem("p", vec![text("text")]),
                elem("ul", vec![elem("li", vec![elem("p", vec![text("one")])])]),
            ]
        )])
    );
}

#[test]
fn test_definition_list() {
    let doc = parse("  % coffee\n    hot drink\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "dl",
            vec![
                elem("dt", vec![text("coffee")]),
                elem("dd", vec![elem("p", vec![text("hot drink")])]),
            ]
        )])
    );
}

#[test]
fn test_definition_list_with_two_terms() {
    let doc = parse("  % a\n    one\n  % b\n    two\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "dl",
            vec![
                elem("dt", vec![text("a")]),
                elem("dd", vec![elem("p", vec![text("one")])]),
                elem("dt", vec![text("b")]),
                elem("dd", vec![elem("p", vec![text("two")])]),
            ]
        )])
    );
}

#[test]
fn test_term_without_definition() {
    let doc = parse("  % a\n  % b\n    two\n").unwrap();
    assert_eq!(
        doc,
        body(vec![elem(
            "dl",
            vec![
                elem("dt", vec![text("a")]),
                elem("dt", vec![text("b")]),
                elem("dd", vec![elem("p", vec![text("two")])]),
            ]
        )])
    );
}

#[test]
fn test_marker_mismatch_is_an_error() {
    assert!(parse("- a\n# b\n").is_err());
}

#[test]
fn test_marker_without_space_is_an_error_inside_list() {
    assert!(parse("- a\n-x\n").is_err());
}
