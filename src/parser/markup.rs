//! The Markup controller and parse driver
//!
//! A [`Markup`] value holds the per-document options (subdocument tags and
//! tab width); each call to [`Markup::parse`] runs one parse with fresh
//! state. The driver feeds every token to the top-of-stack parser state's
//! `grok` operation; a state may push and pop parser states, open and close
//! elements, and hand tokens back for re-delivery to the state left on top.

use std::collections::{HashSet, VecDeque};

use crate::ast::Element;
use crate::error::Error;
use crate::lexer::{lex, IndentHandle, Position, Token};
use crate::parser::arena::{Arena, ElementId};
use crate::parser::states::State;

/// Tokens a grok step hands back for re-delivery, in delivery order
pub(crate) type Redeliver = Vec<(Token, Position)>;

/// Parser for vellum documents, configured once and reusable across parses
#[derive(Debug, Clone)]
pub struct Markup {
    subdocs: HashSet<String>,
    tabwidth: usize,
}

impl Default for Markup {
    fn default() -> Self {
        Self::new()
    }
}

impl Markup {
    pub fn new() -> Self {
        Self {
            subdocs: HashSet::new(),
            tabwidth: 8,
        }
    }

    /// Tags that, when opened via `\name{…}`, run nested block parsing
    /// instead of inline-only rules. Default: none.
    pub fn with_subdocs<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdocs = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Number of spaces a tab expands to. Default: 8.
    pub fn with_tabwidth(mut self, tabwidth: usize) -> Self {
        assert!(tabwidth > 0, "tabwidth must be positive");
        self.tabwidth = tabwidth;
        self
    }

    /// Parse a document into its element tree (root tag `body`).
    pub fn parse(&self, source: &str) -> Result<Element, Error> {
        let indent = IndentHandle::new();
        let tokens = lex(source, self.tabwidth, indent.clone());
        let mut run = ParseRun::new(self.subdocs.clone(), indent);
        for (token, pos) in tokens {
            run.feed(token, pos)?;
        }
        run.finish()
    }

    /// Parse from raw bytes, validating UTF-8 at the boundary.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Element, Error> {
        let source = std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })?;
        self.parse(source)
    }
}

/// State for a single parse: the element arena and the two stacks
pub(crate) struct ParseRun {
    pub(crate) arena: Arena,
    root: ElementId,
    elements: Vec<ElementId>,
    parsers: Vec<State>,
    pub(crate) indent: IndentHandle,
    pub(crate) subdocs: HashSet<String>,
}

impl ParseRun {
    fn new(subdocs: HashSet<String>, indent: IndentHandle) -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc("body");
        Self {
            arena,
            root,
            elements: vec![root],
            parsers: vec![State::Document {
                element: root,
                brace_is_eof: false,
                nested: false,
            }],
            indent,
            subdocs,
        }
    }

    /// Deliver one token to the top-of-stack state, looping any tokens the
    /// state hands back through the state left on top.
    fn feed(&mut self, token: Token, pos: Position) -> Result<(), Error> {
        let mut queue: VecDeque<(Token, Position)> = VecDeque::new();
        queue.push_back((token, pos));
        while let Some((token, pos)) = queue.pop_front() {
            let state = self
                .parsers
                .pop()
                .ok_or_else(|| Error::syntax("no active parser", pos))?;
            let redeliver = self.grok(state, token, pos)?;
            for item in redeliver.into_iter().rev() {
                queue.push_front(item);
            }
        }
        Ok(())
    }

    /// The tokenizer has already emitted the end-of-input blank and closed
    /// every indented context; whatever is still open (a list whose item
    /// bump had no matching dedent, an unterminated section) closes here,
    /// innermost first.
    fn finish(mut self) -> Result<Element, Error> {
        self.elements.clear();
        Ok(self.arena.take(self.root))
    }

    fn grok(&mut self, state: State, token: Token, pos: Position) -> Result<Redeliver, Error> {
        match state {
            State::Document {
                element,
                brace_is_eof,
                nested,
            } => self.grok_document(element, brace_is_eof, nested, token, pos),
            State::Paragraph {
                element,
                brace_is_eof,
            } => self.grok_paragraph(element, brace_is_eof, token, pos),
            State::Header {
                level,
                brace_is_eof,
            } => self.grok_header(level, brace_is_eof, token, pos),
            State::BlockquoteOrList { brace_is_eof } => {
                self.grok_blockquote_or_list(brace_is_eof, token, pos)
            }
            State::Indented {
                element,
                started,
                brace_is_eof,
            } => self.grok_indented(element, started, brace_is_eof, token, pos),
            State::Verbatim { element, blanks } => self.grok_verbatim(element, blanks, token, pos),
            State::List {
                element,
                marker,
                brace_is_eof,
            } => self.grok_list(element, marker, brace_is_eof, token, pos),
            State::Eater { expect, then } => self.grok_eater(expect, then, token, pos),
            State::DefinitionList {
                element,
                brace_is_eof,
            } => self.grok_definition_list(element, brace_is_eof, token, pos),
            State::DefinitionTerm {
                element,
                brace_is_eof,
            } => self.grok_definition_term(element, brace_is_eof, token, pos),
            State::DefinitionBody { brace_is_eof } => {
                self.grok_definition_body(brace_is_eof, token, pos)
            }
            State::Modeline {
                buffered,
                discarding,
                brace_is_eof,
            } => self.grok_modeline(buffered, discarding, brace_is_eof, token, pos),
            State::SectionStart {
                hash_pos,
                second_hash,
                brace_is_eof,
            } => self.grok_section_start(hash_pos, second_hash, brace_is_eof, token, pos),
            State::SectionName {
                name,
                brace_is_eof,
            } => self.grok_section_name(name, brace_is_eof, token, pos),
            State::SectionEnd {
                section,
                hash_pos,
                step,
                brace_is_eof,
            } => self.grok_section_end(section, hash_pos, step, brace_is_eof, token, pos),
            State::Slash => self.grok_slash(token, pos),
            State::Name { name } => self.grok_name(name, token, pos),
            State::BraceDelimited { element } => self.grok_brace_delimited(element, token, pos),
            State::Link { element, key } => self.grok_link(element, key, token, pos),
            State::AmbiguousLink {
                element,
                space_pos,
                brace_is_eof,
            } => self.grok_ambiguous_link(element, space_pos, brace_is_eof, token, pos),
            State::Linkdef { element } => self.grok_linkdef(element, token, pos),
            State::Url { element } => self.grok_url(element, token, pos),
        }
    }

    // ------------------------------------------------------------------
    // Controller operations shared by the parser states
    // ------------------------------------------------------------------

    /// Open an element under the current top of stack and make it current.
    pub(crate) fn open_element(&mut self, tag: &str) -> ElementId {
        let id = self.arena.alloc(tag);
        if let Some(&parent) = self.elements.last() {
            self.arena.append_child(parent, id);
        }
        self.elements.push(id);
        id
    }

    /// Close `id`, which must be exactly the top of the element stack.
    pub(crate) fn close_element(&mut self, id: ElementId, pos: Position) -> Result<(), Error> {
        match self.elements.last() {
            Some(&top) if top == id => {
                self.elements.pop();
                Ok(())
            }
            _ => Err(Error::syntax(
                "close of an element that is not on top of the stack",
                pos,
            )),
        }
    }

    /// The element new children and text currently append to.
    pub(crate) fn current_element(&self) -> Option<ElementId> {
        self.elements.last().copied()
    }

    /// Append a character to the current element's text.
    pub(crate) fn append_char(&mut self, ch: char) {
        if let Some(top) = self.current_element() {
            self.arena.push_char(top, ch);
        }
    }

    pub(crate) fn push_parser(&mut self, state: State) {
        self.parsers.push(state);
    }

    pub(crate) fn pop_parser(&mut self) -> Option<State> {
        self.parsers.pop()
    }
}
