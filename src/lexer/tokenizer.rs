//! Tokenizer for the vellum format
//!
//! The tokenizer is the second pipeline stage. It consumes cleaned
//! [`CharToken`]s and yields semantic [`Token`]s with their positions.
//!
//! # Algorithm
//!
//! Line feeds are not emitted directly; they accumulate in a pending
//! counter. On the next non-LF character the run is flushed: one pending
//! line feed becomes a [`Token::Newline`], `k >= 2` become `k - 1`
//! [`Token::Blank`]s, and the tokenizer re-enters "start of line" mode.
//!
//! At the start of a line, spaces are counted rather than forwarded. The
//! first non-space character reconciles the count against the current
//! expected indentation:
//!
//! - dedent: close the verbatim block (−3) if one is open, then close
//!   blockquotes (−2 each) until the expectation is met
//! - indent by 2: open a blockquote
//! - indent by 1: close the enclosing blockquote and open a verbatim block
//!   (net +1) — a line indented one past a blockquote is preformatted
//! - indent by 3 or more: open a verbatim block; the excess beyond 3 passes
//!   through as literal spaces, as do deeper indents on later verbatim lines
//!
//! At end of input the tokenizer emits one final [`Token::Blank`] and then
//! closes any open verbatim block and all open blockquotes.
//!
//! The current indentation lives behind an [`IndentHandle`] so that the list
//! parser can bump the expectation by 2 after consuming an item marker —
//! the control channel that couples the tokenizer to the parser.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::cleaner::{CharToken, Position};
use super::tokens::Token;

/// Shared handle onto the tokenizer's current expected indentation
#[derive(Debug, Clone, Default)]
pub struct IndentHandle(Rc<Cell<usize>>);

impl IndentHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }

    pub fn set(&self, columns: usize) {
        self.0.set(columns);
    }

    /// Bump the expected indentation of subsequent lines. Called by the
    /// list parser after a marker and its space have been consumed.
    pub fn add(&self, columns: usize) {
        self.0.set(self.0.get() + columns);
    }
}

/// Streaming tokenizer over cleaned characters
pub struct Tokenizer<I> {
    input: I,
    indent: IndentHandle,
    in_verbatim: bool,
    pending_newlines: usize,
    /// Position of the first pending line feed
    newline_pos: Option<Position>,
    /// `Some(n)` at line start with `n` leading spaces seen; `None` mid-line
    leading: Option<usize>,
    last_pos: Position,
    out: VecDeque<(Token, Position)>,
    done: bool,
}

impl<I: Iterator<Item = CharToken>> Tokenizer<I> {
    pub fn new(input: I, indent: IndentHandle) -> Self {
        Self {
            input,
            indent,
            in_verbatim: false,
            pending_newlines: 0,
            newline_pos: None,
            leading: Some(0),
            last_pos: Position::new(0, 0),
            out: VecDeque::new(),
            done: false,
        }
    }

    fn step(&mut self, tok: CharToken) {
        self.last_pos = tok.pos;
        if tok.ch == '\n' {
            if self.pending_newlines == 0 {
                self.newline_pos = Some(tok.pos);
            }
            self.pending_newlines += 1;
            return;
        }
        self.flush_newlines();
        if let Some(seen) = self.leading {
            if tok.ch == ' ' {
                self.leading = Some(seen + 1);
                return;
            }
            self.reconcile(seen, tok.pos);
            self.leading = None;
        }
        self.forward(tok);
    }

    fn flush_newlines(&mut self) {
        let pending = self.pending_newlines;
        if pending == 0 {
            return;
        }
        let pos = self.newline_pos.take().unwrap_or(self.last_pos);
        if pending == 1 {
            self.out.push_back((Token::Newline, pos));
        } else {
            for _ in 0..pending - 1 {
                self.out.push_back((Token::Blank, pos));
            }
        }
        self.pending_newlines = 0;
        self.leading = Some(0);
    }

    /// Reconcile a line's leading space count against the current expected
    /// indentation, emitting open/close tokens for the difference.
    fn reconcile(&mut self, seen: usize, pos: Position) {
        let mut current = self.indent.get();
        if seen < current {
            if self.in_verbatim {
                self.out.push_back((Token::CloseVerbatim, pos));
                current = current.saturating_sub(3);
                self.in_verbatim = false;
            }
            while seen < current {
                self.out.push_back((Token::CloseBlockquote, pos));
                current = current.saturating_sub(2);
            }
        }
        if seen > current {
            let delta = seen - current;
            if self.in_verbatim {
                // preformatted lines keep their extra indentation
                for _ in 0..delta {
                    self.out.push_back((Token::Space, pos));
                }
            } else if delta == 2 {
                self.out.push_back((Token::OpenBlockquote, pos));
                current += 2;
            } else if delta == 1 {
                self.out.push_back((Token::CloseBlockquote, pos));
                self.out.push_back((Token::OpenVerbatim, pos));
                current += 1;
                self.in_verbatim = true;
            } else {
                self.out.push_back((Token::OpenVerbatim, pos));
                for _ in 0..delta - 3 {
                    self.out.push_back((Token::Space, pos));
                }
                current += 3;
                self.in_verbatim = true;
            }
        }
        self.indent.set(current);
    }

    fn forward(&mut self, tok: CharToken) {
        let token = if tok.ch == ' ' {
            if self.in_verbatim {
                Token::Space
            } else {
                Token::Char(' ')
            }
        } else {
            Token::Char(tok.ch)
        };
        self.out.push_back((token, tok.pos));
    }

    /// Pending line feeds collapse into the end-of-input blank; then every
    /// open indented context closes.
    fn finish_input(&mut self) {
        let pos = self.newline_pos.take().unwrap_or(self.last_pos);
        self.pending_newlines = 0;
        self.out.push_back((Token::Blank, pos));
        let mut current = self.indent.get();
        if self.in_verbatim {
            self.out.push_back((Token::CloseVerbatim, pos));
            current = current.saturating_sub(3);
            self.in_verbatim = false;
        }
        while current > 0 {
            self.out.push_back((Token::CloseBlockquote, pos));
            current = current.saturating_sub(2);
        }
        self.indent.set(current);
    }
}

impl<I: Iterator<Item = CharToken>> Iterator for Tokenizer<I> {
    type Item = (Token, Position);

    fn next(&mut self) -> Option<(Token, Position)> {
        loop {
            if let Some(item) = self.out.pop_front() {
                return Some(item);
            }
            if self.done {
                return None;
            }
            match self.input.next() {
                Some(tok) => self.step(tok),
                None => {
                    self.finish_input();
                    self.done = true;
                }
            }
        }
    }
}
