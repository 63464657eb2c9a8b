//! Parser states and the block-level grammar
//!
//! Every parser state is a variant of [`State`], holding only what it
//! needs: the element it is building, lookahead buffers, flags. The driver
//! in `markup` pops the top state and dispatches on the variant; a state
//! that stays active pushes itself back before pushing any child states.
//!
//! `brace_is_eof` marks states created inside a `\name{…}` subdocument,
//! where a `}` closes the enclosing block structure instead of being
//! literal text.

use crate::error::Error;
use crate::lexer::{Position, Token};
use crate::parser::arena::ElementId;
use crate::parser::markup::{ParseRun, Redeliver};

#[derive(Debug)]
pub(crate) enum State {
    /// Block-level dispatch for the document body, a `\name{…}` subdocument
    /// (`brace_is_eof`), or a named section body (`nested`)
    Document {
        element: ElementId,
        brace_is_eof: bool,
        nested: bool,
    },
    /// A paragraph (also runs on header elements after the stars)
    Paragraph {
        element: ElementId,
        brace_is_eof: bool,
    },
    /// Star-counting after a `*` at block start
    Header { level: usize, brace_is_eof: bool },
    /// The token after an `OpenBlockquote` decides the block kind
    BlockquoteOrList { brace_is_eof: bool },
    /// Body of a blockquote, list item, or definition
    Indented {
        element: ElementId,
        started: bool,
        brace_is_eof: bool,
    },
    /// Preformatted block
    Verbatim { element: ElementId, blanks: usize },
    /// Ordered or unordered list; the first marker token fixes the marker
    List {
        element: ElementId,
        marker: Option<char>,
        brace_is_eof: bool,
    },
    /// One-shot state: require the next token to equal `expect`, then run
    /// the continuation
    Eater { expect: Token, then: OnMatch },
    DefinitionList {
        element: ElementId,
        brace_is_eof: bool,
    },
    DefinitionTerm {
        element: ElementId,
        brace_is_eof: bool,
    },
    /// Between a closed term and its indented definition body
    DefinitionBody { brace_is_eof: bool },
    /// Lookahead after `-` at block start: editor modeline, list item, or
    /// paragraph (buffers at most three tokens)
    Modeline {
        buffered: Vec<(Token, Position)>,
        discarding: bool,
        brace_is_eof: bool,
    },
    /// Lookahead after `#` at block start outside a section: `# ` starts an
    /// ordered list, `## name` a named section
    SectionStart {
        hash_pos: Position,
        second_hash: bool,
        brace_is_eof: bool,
    },
    /// Accumulates a section name up to the terminating blank line
    SectionName { name: String, brace_is_eof: bool },
    /// Lookahead after `#` inside a section: `##.` ends the section, `## `
    /// opens a nested one, `# ` starts an ordered list
    SectionEnd {
        section: ElementId,
        hash_pos: Position,
        step: SectionEndStep,
        brace_is_eof: bool,
    },
    /// After a `\` in inline content
    Slash,
    /// Accumulates an inline tag name up to `{`
    Name { name: String },
    /// Inline-only rules until `}`
    BraceDelimited { element: ElementId },
    /// `[text]` or `[text|key]`
    Link {
        element: ElementId,
        key: Option<ElementId>,
    },
    /// After a block-start link: decides link definition vs paragraph
    AmbiguousLink {
        element: ElementId,
        space_pos: Option<Position>,
        brace_is_eof: bool,
    },
    /// `[key] <url>` once the wrapping element is retagged `link_def`
    Linkdef { element: ElementId },
    /// URL accumulation until `>`
    Url { element: ElementId },
}

/// Continuations for [`State::Eater`]
#[derive(Debug)]
pub(crate) enum OnMatch {
    /// Bump the expected indentation by 2, open an `li`, parse its body
    OpenListItem { brace_is_eof: bool },
    /// Open a `dt` for the text after `% `
    OpenDefinitionTerm { brace_is_eof: bool },
}

/// Progress through the `##.` end-of-section lookahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionEndStep {
    AfterHash,
    AfterSecondHash,
    AfterDot,
}

impl ParseRun {
    pub(crate) fn grok_document(
        &mut self,
        element: ElementId,
        brace_is_eof: bool,
        nested: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        let stay = State::Document {
            element,
            brace_is_eof,
            nested,
        };
        match token {
            Token::Blank | Token::Newline => {
                self.push_parser(stay);
                Ok(vec![])
            }
            Token::Char('*') => {
                self.push_parser(stay);
                self.push_parser(State::Header {
                    level: 1,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            Token::Char('-') => {
                self.push_parser(stay);
                self.push_parser(State::Modeline {
                    buffered: vec![(token, pos)],
                    discarding: false,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            Token::Char('#') => {
                self.push_parser(stay);
                if nested {
                    self.push_parser(State::SectionEnd {
                        section: element,
                        hash_pos: pos,
                        step: SectionEndStep::AfterHash,
                        brace_is_eof,
                    });
                } else {
                    self.push_parser(State::SectionStart {
                        hash_pos: pos,
                        second_hash: false,
                        brace_is_eof,
                    });
                }
                Ok(vec![])
            }
            Token::Char('[') => {
                self.push_parser(stay);
                self.open_link_block(brace_is_eof);
                Ok(vec![])
            }
            Token::Char('}') if brace_is_eof => {
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::OpenBlockquote => {
                self.push_parser(stay);
                self.push_parser(State::BlockquoteOrList { brace_is_eof });
                Ok(vec![])
            }
            Token::OpenVerbatim => {
                self.push_parser(stay);
                let pre = self.open_element("pre");
                self.push_parser(State::Verbatim {
                    element: pre,
                    blanks: 0,
                });
                Ok(vec![])
            }
            Token::CloseBlockquote | Token::CloseVerbatim => {
                Err(Error::syntax("unexpected dedent", pos))
            }
            Token::Space | Token::Char(_) => {
                self.push_parser(stay);
                let p = self.open_element("p");
                self.push_parser(State::Paragraph {
                    element: p,
                    brace_is_eof,
                });
                Ok(vec![(token, pos)])
            }
        }
    }

    pub(crate) fn grok_paragraph(
        &mut self,
        element: ElementId,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        let stay = State::Paragraph {
            element,
            brace_is_eof,
        };
        match token {
            Token::Blank => {
                self.close_paragraph(element, pos)?;
                Ok(vec![])
            }
            Token::Newline => {
                // wrapped lines join with a single space
                self.append_char(' ');
                self.push_parser(stay);
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
            Token::Char('}') if brace_is_eof => {
                self.close_paragraph(element, pos)?;
                Ok(vec![(token, pos)])
            }
            Token::OpenBlockquote
            | Token::CloseBlockquote
            | Token::OpenVerbatim
            | Token::CloseVerbatim => {
                // a new block begins (or the enclosing one ends): hand the
                // token back to the parent state
                self.close_paragraph(element, pos)?;
                Ok(vec![(token, pos)])
            }
            Token::Space => {
                self.append_char(' ');
                self.push_parser(stay);
                Ok(vec![])
            }
            Token::Char(c) => {
                self.append_char(c);
                self.push_parser(stay);
                Ok(vec![])
            }
        }
    }

    fn close_paragraph(&mut self, element: ElementId, pos: Position) -> Result<(), Error> {
        self.arena.trim_trailing_spaces(element);
        self.close_element(element, pos)
    }

    pub(crate) fn grok_header(
        &mut self,
        level: usize,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Char('*') => {
                self.push_parser(State::Header {
                    level: level + 1,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            Token::Char(' ') => {
                let header = self.open_element(&format!("h{}", level));
                self.push_parser(State::Paragraph {
                    element: header,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            _ => Err(Error::syntax("expected '*' or space in header", pos)),
        }
    }

    pub(crate) fn grok_blockquote_or_list(
        &mut self,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Char('#') => {
                let list = self.open_element("ol");
                self.push_parser(State::List {
                    element: list,
                    marker: None,
                    brace_is_eof,
                });
                Ok(vec![(token, pos)])
            }
            Token::Char('-') => {
                let list = self.open_element("ul");
                self.push_parser(State::List {
                    element: list,
                    marker: None,
                    brace_is_eof,
                });
                Ok(vec![(token, pos)])
            }
            Token::Char('%') => {
                let list = self.open_element("dl");
                self.push_parser(State::DefinitionList {
                    element: list,
                    brace_is_eof,
                });
                Ok(vec![(token, pos)])
            }
            _ => {
                let quote = self.open_element("blockquote");
                self.push_parser(State::Indented {
                    element: quote,
                    started: false,
                    brace_is_eof,
                });
                Ok(vec![(token, pos)])
            }
        }
    }

    pub(crate) fn grok_indented(
        &mut self,
        element: ElementId,
        started: bool,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        let stay = State::Indented {
            element,
            started: true,
            brace_is_eof,
        };
        match token {
            Token::CloseBlockquote => {
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::Blank | Token::Newline => {
                if !started {
                    return Err(Error::syntax("blank at start of indented block", pos));
                }
                self.push_parser(stay);
                Ok(vec![])
            }
            Token::Char('}') if brace_is_eof => {
                self.close_element(element, pos)?;
                Ok(vec![(token, pos)])
            }
            Token::Char('*') => {
                self.push_parser(stay);
                self.push_parser(State::Header {
                    level: 1,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            Token::Char('-') => {
                self.push_parser(stay);
                self.push_parser(State::Modeline {
                    buffered: vec![(token, pos)],
                    discarding: false,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            Token::Char('#') => {
                self.push_parser(stay);
                self.push_parser(State::SectionStart {
                    hash_pos: pos,
                    second_hash: false,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            Token::Char('[') => {
                self.push_parser(stay);
                self.open_link_block(brace_is_eof);
                Ok(vec![])
            }
            Token::OpenBlockquote => {
                self.push_parser(stay);
                self.push_parser(State::BlockquoteOrList { brace_is_eof });
                Ok(vec![])
            }
            Token::OpenVerbatim => {
                self.push_parser(stay);
                let pre = self.open_element("pre");
                self.push_parser(State::Verbatim {
                    element: pre,
                    blanks: 0,
                });
                Ok(vec![])
            }
            Token::CloseVerbatim => Err(Error::syntax("unexpected dedent", pos)),
            Token::Space | Token::Char(_) => {
                self.push_parser(stay);
                let p = self.open_element("p");
                self.push_parser(State::Paragraph {
                    element: p,
                    brace_is_eof,
                });
                Ok(vec![(token, pos)])
            }
        }
    }

    pub(crate) fn grok_verbatim(
        &mut self,
        element: ElementId,
        blanks: usize,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Blank => {
                self.push_parser(State::Verbatim {
                    element,
                    blanks: blanks + 1,
                });
                Ok(vec![])
            }
            Token::Newline => {
                self.append_char('\n');
                self.push_parser(State::Verbatim { element, blanks });
                Ok(vec![])
            }
            Token::CloseVerbatim => {
                // pending blanks at the end of the block are dropped
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::Space | Token::Char(_) => {
                if blanks > 0 {
                    // interior blank lines survive verbatim
                    self.arena.push_str(element, &"\n".repeat(blanks + 1));
                }
                if let Some(c) = token.char_value() {
                    self.append_char(c);
                }
                self.push_parser(State::Verbatim { element, blanks: 0 });
                Ok(vec![])
            }
            _ => Err(Error::syntax("unexpected token in verbatim block", pos)),
        }
    }

    pub(crate) fn grok_list(
        &mut self,
        element: ElementId,
        marker: Option<char>,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Char(c) if marker.is_none() && (c == '-' || c == '#') => {
                self.push_parser(State::List {
                    element,
                    marker: Some(c),
                    brace_is_eof,
                });
                self.push_parser(State::Eater {
                    expect: Token::Char(' '),
                    then: OnMatch::OpenListItem { brace_is_eof },
                });
                Ok(vec![])
            }
            Token::Char(c) if marker == Some(c) => {
                self.push_parser(State::List {
                    element,
                    marker,
                    brace_is_eof,
                });
                self.push_parser(State::Eater {
                    expect: Token::Char(' '),
                    then: OnMatch::OpenListItem { brace_is_eof },
                });
                Ok(vec![])
            }
            Token::CloseBlockquote => {
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::Char('}') if brace_is_eof => {
                self.close_element(element, pos)?;
                Ok(vec![(token, pos)])
            }
            Token::Blank | Token::Newline => {
                self.push_parser(State::List {
                    element,
                    marker,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            _ => Err(Error::syntax("unexpected token in list", pos)),
        }
    }

    pub(crate) fn grok_eater(
        &mut self,
        expect: Token,
        then: OnMatch,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        if token != expect {
            return Err(Error::syntax(format!("expected {}", expect), pos));
        }
        match then {
            OnMatch::OpenListItem { brace_is_eof } => {
                // the marker and its space sit outside the item body, which
                // is indented two columns past them
                self.indent.add(2);
                let item = self.open_element("li");
                self.push_parser(State::Indented {
                    element: item,
                    started: false,
                    brace_is_eof,
                });
            }
            OnMatch::OpenDefinitionTerm { brace_is_eof } => {
                let term = self.open_element("dt");
                self.push_parser(State::DefinitionTerm {
                    element: term,
                    brace_is_eof,
                });
            }
        }
        Ok(vec![])
    }

    pub(crate) fn grok_definition_list(
        &mut self,
        element: ElementId,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Char('%') => {
                self.push_parser(State::DefinitionList {
                    element,
                    brace_is_eof,
                });
                self.push_parser(State::Eater {
                    expect: Token::Char(' '),
                    then: OnMatch::OpenDefinitionTerm { brace_is_eof },
                });
                Ok(vec![])
            }
            Token::CloseBlockquote => {
                self.close_element(element, pos)?;
                Ok(vec![])
            }
            Token::Char('}') if brace_is_eof => {
                self.close_element(element, pos)?;
                Ok(vec![(token, pos)])
            }
            Token::Blank | Token::Newline => {
                self.push_parser(State::DefinitionList {
                    element,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            _ => Err(Error::syntax("unexpected token in definition list", pos)),
        }
    }

    pub(crate) fn grok_definition_term(
        &mut self,
        element: ElementId,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Newline | Token::Blank => {
                self.close_element(element, pos)?;
                self.push_parser(State::DefinitionBody { brace_is_eof });
                Ok(vec![])
            }
            Token::Char('\\') => {
                self.push_parser(State::DefinitionTerm {
                    element,
                    brace_is_eof,
                });
                self.push_parser(State::Slash);
                Ok(vec![])
            }
            Token::Space | Token::Char(_) => {
                if let Some(c) = token.char_value() {
                    self.append_char(c);
                }
                self.push_parser(State::DefinitionTerm {
                    element,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            _ => Err(Error::syntax("unexpected token in definition term", pos)),
        }
    }

    pub(crate) fn grok_definition_body(
        &mut self,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::OpenBlockquote => {
                let definition = self.open_element("dd");
                self.push_parser(State::Indented {
                    element: definition,
                    started: false,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            // next term, end of the list, or end of the subdocument: hand
            // the token back to the definition list
            Token::Char('%') | Token::CloseBlockquote => Ok(vec![(token, pos)]),
            Token::Char('}') if brace_is_eof => Ok(vec![(token, pos)]),
            Token::Blank | Token::Newline => {
                self.push_parser(State::DefinitionBody { brace_is_eof });
                Ok(vec![])
            }
            _ => Err(Error::syntax("expected indented definition", pos)),
        }
    }

    pub(crate) fn grok_modeline(
        &mut self,
        mut buffered: Vec<(Token, Position)>,
        discarding: bool,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        if discarding {
            return match token {
                // the modeline is gone along with its line break
                Token::Newline | Token::Blank => Ok(vec![]),
                _ => {
                    self.push_parser(State::Modeline {
                        buffered,
                        discarding: true,
                        brace_is_eof,
                    });
                    Ok(vec![])
                }
            };
        }
        match (buffered.len(), token) {
            (1, Token::Char('*')) => {
                buffered.push((token, pos));
                self.push_parser(State::Modeline {
                    buffered,
                    discarding: false,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            (1, Token::Char(' ')) => {
                // `- `: an unordered list item, not a modeline
                let list = self.open_element("ul");
                self.push_parser(State::List {
                    element: list,
                    marker: None,
                    brace_is_eof,
                });
                buffered.push((token, pos));
                Ok(buffered)
            }
            (2, Token::Char('-')) => {
                // `-*-` confirmed: discard the rest of the line
                self.push_parser(State::Modeline {
                    buffered: Vec::new(),
                    discarding: true,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            (_, token) => {
                // a paragraph that happens to start with '-'
                let p = self.open_element("p");
                self.push_parser(State::Paragraph {
                    element: p,
                    brace_is_eof,
                });
                buffered.push((token, pos));
                Ok(buffered)
            }
        }
    }

    pub(crate) fn grok_section_start(
        &mut self,
        hash_pos: Position,
        second_hash: bool,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        if second_hash {
            return match token {
                Token::Char(' ') => {
                    self.push_parser(State::SectionName {
                        name: String::new(),
                        brace_is_eof,
                    });
                    Ok(vec![])
                }
                _ => Err(Error::syntax("expected space after '##'", pos)),
            };
        }
        match token {
            Token::Char('#') => {
                self.push_parser(State::SectionStart {
                    hash_pos,
                    second_hash: true,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            Token::Char(' ') => {
                // `# `: an ordered list item
                let list = self.open_element("ol");
                self.push_parser(State::List {
                    element: list,
                    marker: None,
                    brace_is_eof,
                });
                Ok(vec![(Token::Char('#'), hash_pos), (token, pos)])
            }
            _ => Err(Error::syntax("expected '#' or space after '#'", pos)),
        }
    }

    pub(crate) fn grok_section_name(
        &mut self,
        mut name: String,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match token {
            Token::Blank => {
                if name.is_empty() {
                    return Err(Error::syntax("empty section name", pos));
                }
                let section = self.open_element(&name);
                self.push_parser(State::Document {
                    element: section,
                    brace_is_eof,
                    nested: true,
                });
                Ok(vec![])
            }
            Token::Newline => Err(Error::syntax(
                "section heading must be followed by a blank line",
                pos,
            )),
            Token::Space | Token::Char(_) => {
                if let Some(c) = token.char_value() {
                    name.push(c);
                }
                self.push_parser(State::SectionName {
                    name,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            _ => Err(Error::syntax("unexpected token in section name", pos)),
        }
    }

    pub(crate) fn grok_section_end(
        &mut self,
        section: ElementId,
        hash_pos: Position,
        step: SectionEndStep,
        brace_is_eof: bool,
        token: Token,
        pos: Position,
    ) -> Result<Redeliver, Error> {
        match (step, token) {
            (SectionEndStep::AfterHash, Token::Char('#')) => {
                self.push_parser(State::SectionEnd {
                    section,
                    hash_pos,
                    step: SectionEndStep::AfterSecondHash,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            (SectionEndStep::AfterHash, Token::Char(' ')) => {
                // `# `: an ordered list inside the section body
                let list = self.open_element("ol");
                self.push_parser(State::List {
                    element: list,
                    marker: None,
                    brace_is_eof,
                });
                Ok(vec![(Token::Char('#'), hash_pos), (Token::Char(' '), pos)])
            }
            (SectionEndStep::AfterSecondHash, Token::Char('.')) => {
                self.push_parser(State::SectionEnd {
                    section,
                    hash_pos,
                    step: SectionEndStep::AfterDot,
                    brace_is_eof,
                });
                Ok(vec![])
            }
            (SectionEndStep::AfterSecondHash, Token::Char(' ')) => {
                // `## name` inside a section: a nested section
                self.push_parser(State::SectionName {
                    name: String::new(),
                    brace_is_eof,
                });
                Ok(vec![])
            }
            (SectionEndStep::AfterDot, Token::Blank) => {
                // `##.` closes the section and its nested document parser
                self.close_element(section, pos)?;
                self.pop_parser();
                Ok(vec![])
            }
            (SectionEndStep::AfterDot, _) => Err(Error::syntax(
                "expected a blank line after '##.'",
                pos,
            )),
            _ => Err(Error::syntax("malformed section marker", pos)),
        }
    }

    /// Shared by Document and Indented: `[` at block start is either a link
    /// definition or a paragraph beginning with a link; an unnamed wrapper
    /// element is opened and retagged once the lookahead decides.
    fn open_link_block(&mut self, brace_is_eof: bool) {
        let wrapper = self.open_element("");
        self.push_parser(State::AmbiguousLink {
            element: wrapper,
            space_pos: None,
            brace_is_eof,
        });
        let link = self.open_element("link");
        self.push_parser(State::Link {
            element: link,
            key: None,
        });
    }
}
