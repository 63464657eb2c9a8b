//! Error types for parsing and link resolution

use std::fmt;

use crate::lexer::cleaner::Position;

/// Errors surfaced by the parsing pipeline and the post-parse passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Structural parse error: an unexpected token in a parser state, or an
    /// attempt to close an element that is not on top of the element stack.
    /// Fatal; the partially built tree is discarded.
    Syntax { message: String, position: Position },
    /// Invalid UTF-8 at the external input boundary
    InvalidUtf8 { valid_up_to: usize },
    /// A link whose key has no matching link definition
    UnresolvedLink { key: String },
    /// A serialized element value that does not follow the array convention
    Value { message: String },
}

impl Error {
    pub(crate) fn syntax(message: impl Into<String>, position: Position) -> Self {
        Error::Syntax {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn value(message: impl Into<String>) -> Self {
        Error::Value {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax { message, position } => {
                write!(f, "syntax error at {}: {}", position, message)
            }
            Error::InvalidUtf8 { valid_up_to } => {
                write!(f, "input is not valid UTF-8 (valid up to byte {})", valid_up_to)
            }
            Error::UnresolvedLink { key } => {
                write!(f, "no link definition for key '{}'", key)
            }
            Error::Value { message } => write!(f, "malformed element value: {}", message),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = Error::syntax("unexpected token", Position::new(3, 7));
        assert_eq!(err.to_string(), "syntax error at 3:7: unexpected token");
    }

    #[test]
    fn test_display_unresolved_link() {
        let err = Error::UnresolvedLink {
            key: "docs".to_string(),
        };
        assert_eq!(err.to_string(), "no link definition for key 'docs'");
    }
}
