// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Shared read position over the scanner input.

use super::{Token, TokenKind};
use crate::error::ConstructionError;

/// Read position, line counter and line-start flag over an immutable input.
///
/// Sub-scanners borrow the cursor mutably for one lexeme and leave it just
/// past the last character they consumed.
#[derive(Debug, Clone)]
pub struct Cursor {
    input: Vec<char>,
    position: usize,
    line: usize,
    at_line_start: bool,
}

/// A saved cursor position, restorable with [`Cursor::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    position: usize,
    line: usize,
}

impl Cursor {
    /// Creates a cursor at the start of `input`, on line 0.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 0,
            at_line_start: true,
        }
    }

    /// Creates a cursor at character `position`, reporting tokens on `line`.
    pub fn with_start(input: &str, position: usize, line: usize) -> Result<Self, ConstructionError> {
        let mut cursor = Self::new(input);
        if position > cursor.input.len() {
            return Err(ConstructionError::PositionOutOfBounds {
                position,
                len: cursor.input.len(),
            });
        }
        cursor.position = position;
        cursor.line = line;
        cursor.at_line_start = position == 0 || cursor.input[position - 1] == '\n';
        Ok(cursor)
    }

    /// Current character offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current 0-based line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of characters in the input.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Returns true if the input has no characters at all.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Whether the cursor sits at the start of a line.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Clears the line-start flag once a line's content begins.
    pub fn leave_line_start(&mut self) {
        self.at_line_start = false;
    }

    /// Whether any input remains.
    pub fn has_next(&self) -> bool {
        self.position < self.input.len()
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.peek_nth(1)
    }

    /// The character after the next one.
    pub fn peek2(&self) -> Option<char> {
        self.peek_nth(2)
    }

    /// Two characters past the next one.
    pub fn peek3(&self) -> Option<char> {
        self.peek_nth(3)
    }

    /// The `k`-th upcoming character, 1-based.
    pub fn peek_nth(&self, k: usize) -> Option<char> {
        debug_assert!(k >= 1);
        self.input.get(self.position + k - 1).copied()
    }

    /// Consumes and returns the next character.
    ///
    /// Consuming a newline moves to the start of the next line.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.at_line_start = true;
        }
        Some(ch)
    }

    /// Consumes the next character if it satisfies `pred`.
    pub fn advance_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(ch) if pred(ch) => self.advance(),
            _ => None,
        }
    }

    /// Consumes a run of plain spaces, returning how many there were.
    ///
    /// Never crosses a newline.
    pub fn eat_spaces(&mut self) -> usize {
        let start = self.position;
        while self.peek() == Some(' ') {
            self.position += 1;
        }
        self.position - start
    }

    /// Consumes a run of newlines, counting each one as a new line.
    pub fn eat_newlines(&mut self) -> usize {
        let start = self.position;
        while self.advance_if(|c| c == '\n').is_some() {}
        self.position - start
    }

    /// Saves the current position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            line: self.line,
        }
    }

    /// Restores a position saved by [`Cursor::checkpoint`].
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.position <= self.input.len());
        self.position = checkpoint.position;
        self.line = checkpoint.line;
    }

    /// Starts a lexeme at the current position.
    pub fn begin(&self) -> Lexeme {
        Lexeme {
            text: String::new(),
            line: self.line,
            offset: self.position,
        }
    }
}

/// Accumulation buffer for the lexeme being scanned.
#[derive(Debug, Clone)]
pub struct Lexeme {
    text: String,
    line: usize,
    offset: usize,
}

impl Lexeme {
    /// Appends a character to the lexeme text.
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// The text accumulated so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Builds the token from the accumulated text.
    pub fn finish(self, kind: TokenKind) -> Token {
        Token::new(kind, self.text, self.line, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = Cursor::new("abc");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek2(), Some('b'));
        assert_eq!(cursor.peek3(), Some('c'));
        assert_eq!(cursor.peek_nth(4), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_advance_until_exhausted() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        assert!(!cursor.has_next());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_positions_are_characters() {
        let mut cursor = Cursor::new("ñx");
        cursor.advance();
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn test_eat_newlines_counts_lines() {
        let mut cursor = Cursor::new("\n\n\nx");
        cursor.leave_line_start();
        assert_eq!(cursor.eat_newlines(), 3);
        assert_eq!(cursor.line(), 3);
        assert!(cursor.at_line_start());
    }

    #[test]
    fn test_advance_over_newline() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        cursor.leave_line_start();
        cursor.advance();
        assert_eq!(cursor.line(), 1);
        assert!(cursor.at_line_start());
    }

    #[test]
    fn test_eat_spaces_stops_at_newline() {
        let mut cursor = Cursor::new("   \n ");
        assert_eq!(cursor.eat_spaces(), 3);
        assert_eq!(cursor.peek(), Some('\n'));
    }

    #[test]
    fn test_rewind() {
        let mut cursor = Cursor::new("(   x");
        cursor.advance();
        let checkpoint = cursor.checkpoint();
        cursor.eat_spaces();
        cursor.rewind(checkpoint);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_with_start() {
        let cursor = Cursor::with_start("abc", 3, 7).unwrap();
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.line(), 7);
        assert!(!cursor.at_line_start());
        assert!(Cursor::with_start("a\nb", 2, 1).unwrap().at_line_start());

        assert_eq!(
            Cursor::with_start("abc", 4, 0).unwrap_err(),
            ConstructionError::PositionOutOfBounds { position: 4, len: 3 }
        );
    }

    #[test]
    fn test_lexeme_records_start() {
        let mut cursor = Cursor::new("  ab");
        cursor.eat_spaces();
        let mut lexeme = cursor.begin();
        lexeme.push('a');
        let token = lexeme.finish(TokenKind::Identifier);
        assert_eq!(token.offset, 2);
        assert_eq!(token.text, "a");
    }
}
