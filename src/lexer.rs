//! Lexing pipeline for the vellum format
//!
//! The pipeline has two stages, both exposed as pull iterators so that the
//! parser can consume tokens one at a time:
//!
//! 1. [`TextCleaner`] — consumes Unicode scalars and yields position-tagged
//!    [`CharToken`]s with tabs expanded, CR/CRLF normalized to LF, and
//!    trailing whitespace dropped per line.
//! 2. [`Tokenizer`] — consumes cleaned characters and yields semantic
//!    [`Token`]s, reconciling each line's leading indentation against the
//!    current expected indentation.
//!
//! Laziness matters here: the list parser bumps the expected indentation
//! through [`IndentHandle`] after consuming a list marker, so indentation
//! cannot be resolved in a batch pass over the whole source.

pub mod cleaner;
pub mod tokenizer;
pub mod tokens;

pub use cleaner::{CharToken, Position, TextCleaner};
pub use tokenizer::{IndentHandle, Tokenizer};
pub use tokens::Token;

/// Assemble the full lexing pipeline over a source string.
///
/// The `indent` handle is shared with the caller; the parser uses it to push
/// the expected indentation when it enters a list item.
pub fn lex(
    source: &str,
    tabwidth: usize,
    indent: IndentHandle,
) -> Tokenizer<TextCleaner<std::str::Chars<'_>>> {
    Tokenizer::new(TextCleaner::new(source.chars(), tabwidth), indent)
}

/// Collect the token stream for a source with a fresh indentation handle.
/// Mostly useful in tests and debugging output.
pub fn lex_to_vec(source: &str, tabwidth: usize) -> Vec<(Token, Position)> {
    lex(source, tabwidth, IndentHandle::new()).collect()
}
