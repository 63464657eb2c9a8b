//! Token streams for representative documents

use vellum::lexer::Token::*;
use vellum::lexer::{lex_to_vec, Token};

fn kinds(source: &str) -> Vec<Token> {
    lex_to_vec(source, 8).into_iter().map(|(t, _)| t).collect()
}

fn chars(text: &str) -> Vec<Token> {
    text.chars().map(Char).collect()
}

#[test]
fn test_paragraph_break_stream() {
    let mut expected = chars("ab");
    expected.push(Blank);
    expected.extend(chars("cd"));
    expected.push(Blank);
    assert_eq!(kinds("ab\n\ncd\n"), expected);
}

#[test]
fn test_blockquote_stream() {
    let mut expected = vec![OpenBlockquote];
    expected.extend(chars("quote"));
    expected.push(Newline);
    expected.extend(chars("wrap"));
    expected.push(Blank);
    expected.push(CloseBlockquote);
    assert_eq!(kinds("  quote\n  wrap\n"), expected);
}

#[test]
fn test_verbatim_stream_preserves_blank_interior() {
    let mut expected = vec![OpenVerbatim];
    expected.extend(chars("a"));
    expected.push(Blank);
    expected.extend(chars("b"));
    expected.push(Blank);
    expected.push(CloseVerbatim);
    assert_eq!(kinds("   a\n\n   b\n"), expected);
}

#[test]
fn test_definition_list_stream() {
    let mut expected = vec![OpenBlockquote];
    expected.extend(chars("% t"));
    expected.push(Newline);
    expected.push(OpenBlockquote);
    expected.extend(chars("d"));
    expected.push(Blank);
    expected.push(CloseBlockquote);
    expected.push(CloseBlockquote);
    assert_eq!(kinds("  % t\n    d\n"), expected);
}

#[test]
fn test_crlf_and_tabs_normalize() {
    // a tab at line start expands to eight spaces: verbatim plus five
    // interior spaces
    let mut expected = chars("a");
    expected.push(Newline);
    expected.push(OpenVerbatim);
    expected.extend([Space, Space, Space, Space, Space]);
    expected.extend(chars("b"));
    expected.push(Blank);
    expected.push(CloseVerbatim);
    assert_eq!(kinds("a\r\n\tb"), expected);
}

#[test]
fn test_newlines_never_adjacent() {
    for source in ["a\n\nb", "a\n\n\n\nb\n\n", "  a\n\n  b\n", "a\nb\nc\n"] {
        let tokens = kinds(source);
        for pair in tokens.windows(2) {
            assert!(
                !matches!(pair, [Newline, Newline]),
                "adjacent newlines in {:?} from {:?}",
                tokens,
                source
            );
        }
    }
}

#[test]
fn test_indentation_conservation() {
    for source in [
        "a\n  b\n    c\nd\n",
        "   v\n     w\nx\n",
        "  q\n   v\n",
        "a\n\n      deep\n\nb\n",
    ] {
        let tokens = kinds(source);
        let count = |needle: Token| tokens.iter().filter(|t| **t == needle).count();
        assert_eq!(
            count(OpenBlockquote),
            count(CloseBlockquote),
            "blockquote conservation for {:?}",
            source
        );
        assert_eq!(
            count(OpenVerbatim),
            count(CloseVerbatim),
            "verbatim conservation for {:?}",
            source
        );
    }
}
