// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! The scanner that produces tokens from source text.

use std::collections::VecDeque;

use super::cursor::Cursor;
use super::identifier::{is_identifier_start, scan_identifier};
use super::indentation::{IndentChange, IndentationError, IndentationStack};
use super::number::scan_number;
use super::operators::{is_operator_char, scan_grouping_sign, scan_operator};
use super::string::scan_string;
use super::{Token, TokenKind};
use crate::error::{ConstructionError, Diagnostics, LexError};

/// Outcome of one pass through the dispatcher.
enum Step {
    /// One or more tokens were recognized
    Emit(Vec<Token>),
    /// Input was consumed without producing a token
    Skip,
    /// Nothing is left to read
    Exhausted,
}

/// A scanner that tokenizes Misti source code.
///
/// A scanner is a single scanning session: it owns its cursor, indentation
/// stack and diagnostics, and is not meant to be shared between threads
/// while in use.
pub struct Scanner {
    cursor: Cursor,
    indentation: IndentationStack,
    diagnostics: Diagnostics,
    pending: VecDeque<Token>,
    finished: bool,
}

impl Scanner {
    /// Creates a new scanner for the given source code.
    pub fn new(source: &str) -> Self {
        Self::from_cursor(Cursor::new(source))
    }

    /// Creates a scanner that starts reading at character `position` and
    /// numbers the first line `line`.
    ///
    /// Used by front ends that feed one line at a time but want line numbers
    /// to keep counting.
    pub fn with_start(source: &str, position: usize, line: usize) -> Result<Self, ConstructionError> {
        Ok(Self::from_cursor(Cursor::with_start(source, position, line)?))
    }

    fn from_cursor(cursor: Cursor) -> Self {
        Self {
            cursor,
            indentation: IndentationStack::new(),
            diagnostics: Diagnostics::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consumes the scanner, returning its diagnostics.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Current 0-based line.
    pub fn line(&self) -> usize {
        self.cursor.line()
    }

    /// Current character offset.
    pub fn offset(&self) -> usize {
        self.cursor.position()
    }

    /// Scans the rest of the input, ending with exactly one EOF token.
    pub fn tokens(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Returns the next batch of tokens, or `None` once the input is
    /// exhausted.
    ///
    /// A batch holds more than one token only for multi-level dedents. The
    /// EOF token is not part of any batch; see [`Scanner::tokens`].
    pub fn next_token(&mut self) -> Option<Vec<Token>> {
        loop {
            match self.step() {
                Step::Emit(tokens) => {
                    tracing::trace!(count = tokens.len(), first = %tokens[0], "emit");
                    return Some(tokens);
                }
                Step::Skip => continue,
                Step::Exhausted => return None,
            }
        }
    }

    fn step(&mut self) -> Step {
        let Some(ch) = self.cursor.peek() else {
            return Step::Exhausted;
        };

        // Whitespace between tokens
        if !self.cursor.at_line_start() && ch == ' ' {
            self.cursor.eat_spaces();
            return Step::Skip;
        }

        // Leading whitespace, or a line back at column 0 inside a block
        if self.cursor.at_line_start() && (ch == ' ' || self.indentation.current() > 0) {
            return self.scan_indentation();
        }

        if ch == '\n' {
            self.cursor.eat_newlines();
            return Step::Skip;
        }

        self.cursor.leave_line_start();

        if ch.is_ascii_digit() {
            return Step::Emit(vec![scan_number(&mut self.cursor)]);
        }
        if is_identifier_start(ch) {
            return Step::Emit(vec![scan_identifier(&mut self.cursor)]);
        }
        if is_operator_char(ch) {
            return Step::Emit(vec![scan_operator(&mut self.cursor)]);
        }
        if let Some(token) = scan_grouping_sign(&mut self.cursor) {
            return Step::Emit(vec![token]);
        }
        if ch == '"' {
            return Step::Emit(vec![scan_string(&mut self.cursor, &mut self.diagnostics)]);
        }

        self.diagnostics.push(LexError::UnrecognizedCharacter {
            ch,
            line: self.cursor.line(),
            offset: self.cursor.position(),
        });
        self.cursor.advance();
        Step::Skip
    }

    fn scan_indentation(&mut self) -> Step {
        let width = self.cursor.eat_spaces();

        match self.cursor.peek() {
            // Trailing whitespace at the end of the input
            None => return Step::Exhausted,
            // Blank line: the stack is left alone
            Some('\n') => {
                self.cursor.eat_newlines();
                return Step::Skip;
            }
            Some(_) => {}
        }

        self.cursor.leave_line_start();
        let line = self.cursor.line();
        let offset = self.cursor.position();

        let dedents = match self.indentation.measure(width) {
            Ok(IndentChange::Unchanged) => return Step::Skip,
            Ok(IndentChange::Indent) => {
                return Step::Emit(vec![Token::synthetic(TokenKind::Indent, line, offset)]);
            }
            Ok(IndentChange::Dedent(count)) => count,
            Err(IndentationError::Misaligned {
                requested,
                popped,
                landed_on,
            }) => {
                self.diagnostics.push(LexError::InconsistentDedent {
                    width: requested,
                    landed_on,
                    line,
                    offset,
                });
                popped
            }
            // `measure` only asks for strictly deeper or shallower levels.
            Err(IndentationError::NotDeeper { .. } | IndentationError::NotShallower { .. }) => {
                return Step::Skip;
            }
        };

        if dedents == 0 {
            return Step::Skip;
        }
        Step::Emit(vec![Token::synthetic(TokenKind::Dedent, line, offset); dedents])
    }
}

impl Iterator for Scanner {
    type Item = Token;

    /// Yields every token in order, then one EOF token, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        if self.finished {
            return None;
        }

        match self.next_token() {
            Some(tokens) => {
                self.pending.extend(tokens);
                self.pending.pop_front()
            }
            None => {
                self.finished = true;
                Some(Token::synthetic(
                    TokenKind::Eof,
                    self.cursor.line(),
                    self.cursor.position(),
                ))
            }
        }
    }
}
