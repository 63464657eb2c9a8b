//! Character cleaning for the vellum format
//!
//! The cleaner is the first pipeline stage. It consumes a stream of Unicode
//! scalars and yields [`CharToken`]s in which:
//!
//! - CRLF, bare CR, and LF all become a single LF
//! - tabs are expanded to `tabwidth` spaces
//! - trailing whitespace on every line is dropped
//!
//! Whitespace is buffered until the next non-whitespace character decides
//! whether it was interior (flushed as spaces) or trailing (discarded).
//! Spaces produced by a tab all carry the column of the tab character; the
//! run is flushed as a unit and the running column advances by one per
//! emitted token.

use std::collections::VecDeque;
use std::fmt;

/// A zero-based line/column position in the cleaned source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single cleaned character with its source position.
/// `ch` is a printable character, a space, or `'\n'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharToken {
    pub ch: char,
    pub pos: Position,
}

impl CharToken {
    fn new(ch: char, line: usize, column: usize) -> Self {
        Self {
            ch,
            pos: Position::new(line, column),
        }
    }
}

/// Streaming cleaner over a character stream
pub struct TextCleaner<I> {
    input: I,
    tabwidth: usize,
    line: usize,
    /// Column of the next token not counting buffered whitespace
    column: usize,
    /// Pending whitespace run, positions already assigned
    buffer: Vec<CharToken>,
    /// A CR has been seen and is held until the next character decides
    /// whether it is part of a CRLF pair
    pending_cr: bool,
    out: VecDeque<CharToken>,
    done: bool,
}

impl<I: Iterator<Item = char>> TextCleaner<I> {
    pub fn new(input: I, tabwidth: usize) -> Self {
        Self {
            input,
            tabwidth,
            line: 0,
            column: 0,
            buffer: Vec::new(),
            pending_cr: false,
            out: VecDeque::new(),
            done: false,
        }
    }

    fn step(&mut self, ch: char) {
        if self.pending_cr {
            self.pending_cr = false;
            self.emit_newline();
            if ch == '\n' {
                return;
            }
        }
        match ch {
            '\r' => self.pending_cr = true,
            '\n' => self.emit_newline(),
            '\t' => {
                // all expansion spaces carry the tab's own column
                let col = self.column + self.buffer.len();
                for _ in 0..self.tabwidth {
                    self.buffer.push(CharToken::new(' ', self.line, col));
                }
            }
            ' ' => {
                let col = self.column + self.buffer.len();
                self.buffer.push(CharToken::new(' ', self.line, col));
            }
            _ => {
                let run = self.buffer.len();
                for tok in self.buffer.drain(..) {
                    self.out.push_back(tok);
                }
                self.column += run;
                self.out.push_back(CharToken::new(ch, self.line, self.column));
                self.column += 1;
            }
        }
    }

    /// Emit the LF for an ended line, discarding buffered trailing
    /// whitespace. The LF's column is the one just after the dropped run.
    fn emit_newline(&mut self) {
        let col = self.column + self.buffer.len();
        self.buffer.clear();
        self.out.push_back(CharToken::new('\n', self.line, col));
        self.line += 1;
        self.column = 0;
    }

    fn finish(&mut self) {
        if self.pending_cr {
            self.pending_cr = false;
            self.emit_newline();
        }
        // whatever whitespace is still buffered is trailing
        self.buffer.clear();
    }
}

impl<I: Iterator<Item = char>> Iterator for TextCleaner<I> {
    type Item = CharToken;

    fn next(&mut self) -> Option<CharToken> {
        loop {
            if let Some(tok) = self.out.pop_front() {
                return Some(tok);
            }
            if self.done {
                return None;
            }
            match self.input.next() {
                Some(ch) => self.step(ch),
                None => {
                    self.finish();
                    self.done = true;
                }
            }
        }
    }
}
