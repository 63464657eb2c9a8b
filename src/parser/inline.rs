//! Inline parser states: escapes, brace-delimited tags, links
//!
//! These states run inside paragraphs (and headers, list items, …): the
//! escape slash, `\name{…}` inline tags and subdocuments, `[text]` /
//! `[text|key]` links, and the `[key] <url>` link-definition tail.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::error::Error;
use crate::lexer::{Position, Token};
use crate::parser::arena::ElementId;
use crate::parser::markup::{ParseRun, Redeliver};
use crate::parser::states::State;

/// Sigils that `\x` turns into literal text
static ESCAPABLE: Lazy<HashSet<char>> = Lazy::new(|| {
    ['\\', '{', '}', '*', '-', '#', '[', ']', '<', '|', '%']
        .into_iter()
        .collect()
});

impl ParseRun {
    pub(crate) fn grok_slash(&mut self, token: Token, pos: Position) -> Result<Redeliver, Error> {
        match token {
            Token::Char(c) if ESCAPABLE.contains(&c) => {
                self.append_char(c);
                Ok(vec![])
            }
            Token::Char(_) => {
                // not an escape: a brace-delimited inline tag name begins
                self.push_parser(State::Name {
                    name: String::new(),
                });
                Ok(vec![(token, pos)])
            }
            _ => Err(Error::syntax("incomplete escape sequence", pos)),
        }
    }

    pub(crate) fn grok_name(
        &mut self,
        mut name: String,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Char('{') => {
                if name.is_empty() {
                    return Err(Error::syntax("empty inline tag name", pos));
                }
                let element = self.open_element(&name);
                if self.subdocs.contains(&name) {
                    self.push_parser(State::Document {
                        element,
                        brace_is_eof: true,
                        nested: false,
                    });
                } else {
                    self.push_parser(State::BraceDelimited { element });
                }
                Ok(vec![])
            }
            Token::Char(c) if c != ' ' => {
                name.push(c);
                self.push_parser(State::Name { name });
                Ok(vec![])
            }
            _ => Err(Error::syntax("expected '{' after inline tag name", pos)),
        }
    }

    pub(crate) fn grok_brace_delimited(
        &mut self,
        element: ElementId,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        let stay = State::BraceDelimited { element };
        match token {
            Token::Char('}') => {
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::Char('\\') => {
                self.push_parser(stay);
                self.push_parser(State::Slash);
                Ok(vec![])
            }
            Token::Char('[') => {
                self.push_parser(stay);
                let link = self.open_element("link");
                self.push_parser(State::Link {
                    element: link,
                    key: None,
                });
                Ok(vec![])
            }
            Token::Newline => {
                self.append_char(' ');
                self.push_parser(stay);
                Ok(vec![])
            }
            Token::Space | Token::Char(_) => {
                if let Some(c) = token.char_value() {
                    self.append_char(c);
                }
                self.push_parser(stay);
                Ok(vec![])
            }
            _ => Err(Error::syntax("unterminated inline tag", pos)),
        }
    }

    pub(crate) fn grok_link(
        &mut self,
        element: ElementId,
        key: Option<ElementId>,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Char('|') if key.is_none() => {
                let key_element = self.open_element("key");
                self.push_parser(State::Link {
                    element,
                    key: Some(key_element),
                });
                Ok(vec![])
            }
            Token::Char(']') => {
                if let Some(key_element) = key {
                    self.close_element(key_element, pos)?;
                }
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::Char('\\') => {
                self.push_parser(State::Link { element, key });
                self.push_parser(State::Slash);
                Ok(vec![])
            }
            Token::Newline => {
                self.append_char(' ');
                self.push_parser(State::Link { element, key });
                Ok(vec![])
            }
            Token::Space | Token::Char(_) => {
                // text goes into the key once one is open
                if let Some(c) = token.char_value() {
                    self.append_char(c);
                }
                self.push_parser(State::Link { element, key });
                Ok(vec![])
            }
            _ => Err(Error::syntax("unterminated link", pos)),
        }
    }

    pub(crate) fn grok_ambiguous_link(
        &mut self,
        element: ElementId,
        space_pos: Option<Position>,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match space_pos {
            None => match token {
                Token::Char(' ') => {
                    self.push_parser(State::AmbiguousLink {
                        element,
                        space_pos: Some(pos),
                        brace_is_eof,
                    });
                    Ok(vec![])
                }
                _ => self.revert_to_paragraph(element, brace_is_eof, vec![(token, pos)]),
            },
            Some(space_pos) => match token {
                Token::Char('<') => {
                    // `[key] <` — this block is a link definition
                    self.arena.retag(element, "link_def");
                    self.push_parser(State::Linkdef { element });
                    Ok(vec![(token, pos)])
                }
                _ => self.revert_to_paragraph(
                    element,
                    brace_is_eof,
                    vec![(Token::Char(' '), space_pos), (token, pos)],
                ),
            },
        }
    }

    /// The block was a paragraph that starts with a link after all: retag
    /// the wrapper and run the buffered tokens through paragraph rules.
    fn revert_to_paragraph(
        &mut self,
        element: ElementId,
        brace_is_eof: bool,
        redeliver: Redeliver,
    ) -> Result<Redeliver, Error> {
        self.arena.retag(element, "p");
        self.push_parser(State::Paragraph {
            element,
            brace_is_eof,
        });
        Ok(redeliver)
    }

    pub(crate) fn grok_linkdef(
        &mut self,
        element: ElementId,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Char('<') => {
                self.push_parser(State::Linkdef { element });
                let url = self.open_element("url");
                self.push_parser(State::Url { element: url });
                Ok(vec![])
            }
            Token::Blank => {
                // the blank line terminates the definition
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::Newline => {
                self.push_parser(State::Linkdef { element });
                Ok(vec![])
            }
            _ => Err(Error::syntax("expected '<url>' in link definition", pos)),
        }
    }

    pub(crate) fn grok_url(
        &mut self,
        element: ElementId,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Char('>') => {
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::Space | Token::Char(_) => {
                if let Some(c) = token.char_value() {
                    self.append_char(c);
                }
                self.push_parser(State::Url { element });
                Ok(vec![])
            }
            _ => Err(Error::syntax("unterminated url", pos)),
        }
    }
}
