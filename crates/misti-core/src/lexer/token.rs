// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Token definitions for the Misti lexer.

use std::fmt;

/// A token produced by the lexer.
///
/// Tokens are immutable once built. `offset` counts characters, not bytes,
/// from the start of the scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The lexeme as it should be seen by the parser
    pub text: String,
    /// 0-based line the token starts on
    pub line: usize,
    /// Character index of the token's first character
    pub offset: usize,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            offset,
        }
    }

    /// Creates a token with empty text (INDENT, DEDENT, EOF).
    pub fn synthetic(kind: TokenKind, line: usize, offset: usize) -> Self {
        Self::new(kind, String::new(), line, offset)
    }

    /// Returns the length of the token text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true if the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns true for tokens that do not come from source characters.
    pub fn is_synthetic(&self) -> bool {
        matches!(self.kind, TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {:?}", self.kind, self.text)
        }
    }
}

/// The different kinds of tokens in Misti.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Literals
    /// Identifier
    Identifier,
    /// Decimal or hexadecimal integer literal
    Integer,
    /// Floating point literal, with a fraction, an exponent, or both
    Floating,
    /// String literal, quotes stripped and escapes resolved
    String,
    /// The unit value `()`
    Unit,

    /// Any run of operator characters
    Operator,

    // Grouping signs
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,

    // Layout
    /// Indentation increased
    Indent,
    /// Indentation decreased by one level
    Dedent,

    // Keywords
    /// var
    Var,
    /// val
    Val,

    // Special
    /// End of file
    Eof,
}

impl TokenKind {
    /// Returns true if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Var | TokenKind::Val)
    }

    /// Returns true if this token is one of the grouping signs.
    pub fn is_grouping(&self) -> bool {
        matches!(
            self,
            TokenKind::LeftParen
                | TokenKind::RightParen
                | TokenKind::LeftBracket
                | TokenKind::RightBracket
                | TokenKind::LeftBrace
                | TokenKind::RightBrace
        )
    }

    /// Returns true if this token is a literal value.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer | TokenKind::Floating | TokenKind::String | TokenKind::Unit
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::Integer => "Integer",
            TokenKind::Floating => "Floating",
            TokenKind::String => "String",
            TokenKind::Unit => "Unit",
            TokenKind::Operator => "Operator",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBracket => "LeftBracket",
            TokenKind::RightBracket => "RightBracket",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Indent => "Indent",
            TokenKind::Dedent => "Dedent",
            TokenKind::Var => "Var",
            TokenKind::Val => "Val",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}
