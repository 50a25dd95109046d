// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Error types for misti-core.
//!
//! Lexical problems are never fatal: they are recorded as [`LexError`]s in a
//! [`Diagnostics`] list while scanning carries on. Only API misuse
//! ([`ConstructionError`]) and parser failures ([`SyntaxError`]) are returned
//! as `Err`.

use thiserror::Error;

use crate::lexer::TokenKind;

/// Result type for misti-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for misti-core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A scanner was built outside of its contract
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// The token stream did not form an expression
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// A recoverable lexical diagnostic.
///
/// Every variant records the 0-based line and the character offset where the
/// problem was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum LexError {
    /// A character that starts no token
    #[error("Unrecognized character {ch:?}.")]
    UnrecognizedCharacter {
        /// The offending character
        ch: char,
        /// 0-based line
        line: usize,
        /// Character offset of `ch`
        offset: usize,
    },

    /// A newline reached before the closing quote
    #[error("Unexpected new line inside a string.")]
    UnterminatedString {
        /// 0-based line
        line: usize,
        /// Character offset of the newline
        offset: usize,
    },

    /// End of input reached before the closing quote
    #[error("Unexpected end of input inside a string.")]
    UnterminatedStringAtEof {
        /// 0-based line
        line: usize,
        /// Character offset of the end of input
        offset: usize,
    },

    /// A dedent that lands between two enclosing indentation levels
    #[error("Indentation of {width} does not match any enclosing level; dedented to {landed_on}.")]
    InconsistentDedent {
        /// Leading width of the line
        width: usize,
        /// Width of the level the stack stopped at
        landed_on: usize,
        /// 0-based line
        line: usize,
        /// Character offset of the line's first non-space character
        offset: usize,
    },
}

impl LexError {
    /// The human readable reason, without location.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// 0-based line of the diagnostic.
    pub fn line(&self) -> usize {
        match self {
            LexError::UnrecognizedCharacter { line, .. }
            | LexError::UnterminatedString { line, .. }
            | LexError::UnterminatedStringAtEof { line, .. }
            | LexError::InconsistentDedent { line, .. } => *line,
        }
    }

    /// Character offset of the diagnostic.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnrecognizedCharacter { offset, .. }
            | LexError::UnterminatedString { offset, .. }
            | LexError::UnterminatedStringAtEof { offset, .. }
            | LexError::InconsistentDedent { offset, .. } => *offset,
        }
    }
}

/// Ordered, append-only list of lexical diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<LexError>,
}

impl Diagnostics {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn push(&mut self, error: LexError) {
        tracing::debug!(line = error.line(), offset = error.offset(), "{}", error);
        self.errors.push(error);
    }

    /// All diagnostics in the order they were recorded.
    pub fn as_slice(&self) -> &[LexError] {
        &self.errors
    }

    /// Iterates over the recorded diagnostics.
    pub fn iter(&self) -> std::slice::Iter<'_, LexError> {
        self.errors.iter()
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the list, returning the diagnostics.
    pub fn into_vec(self) -> Vec<LexError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a LexError;
    type IntoIter = std::slice::Iter<'a, LexError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Misuse of the scanner API. Never collected as a diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The start position lies past the end of the input
    #[error("start position {position} is past the end of the input ({len} characters)")]
    PositionOutOfBounds {
        /// Requested start, in characters
        position: usize,
        /// Input length, in characters
        len: usize,
    },
}

/// Errors raised while parsing a primary expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// `(` expression without its `)`
    #[error("Missing closing paren at line {line}, offset {offset}")]
    MissingClosingParen {
        /// 0-based line of the unmatched `(`
        line: usize,
        /// Character offset of the unmatched `(`
        offset: usize,
    },

    /// A token that cannot start an expression
    #[error("Unexpected {kind} {text:?} at line {line}, offset {offset}")]
    UnexpectedToken {
        /// Kind of the token found
        kind: TokenKind,
        /// Its text
        text: String,
        /// 0-based line of the token
        line: usize,
        /// Character offset of the token
        offset: usize,
    },

    /// The input ended where an expression was expected
    #[error("Unexpected end of input at line {line}, offset {offset}")]
    UnexpectedEndOfInput {
        /// 0-based line where input ended
        line: usize,
        /// Character offset of the end of input
        offset: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_keep_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(LexError::UnterminatedString { line: 0, offset: 7 });
        diagnostics.push(LexError::UnrecognizedCharacter {
            ch: '\t',
            line: 1,
            offset: 9,
        });

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics.as_slice()[0].reason(),
            "Unexpected new line inside a string."
        );
        assert_eq!(diagnostics.iter().nth(1).map(LexError::line), Some(1));
    }

    #[test]
    fn test_location_accessors() {
        let error = LexError::InconsistentDedent {
            width: 6,
            landed_on: 4,
            line: 3,
            offset: 20,
        };
        assert_eq!(error.line(), 3);
        assert_eq!(error.offset(), 20);
        assert!(error.reason().contains("dedented to 4"));
    }

    #[test]
    fn test_construction_error_message() {
        let error = ConstructionError::PositionOutOfBounds {
            position: 9,
            len: 3,
        };
        assert_eq!(
            error.to_string(),
            "start position 9 is past the end of the input (3 characters)"
        );
    }

    #[test]
    fn test_crate_error_from() {
        let error: Error = SyntaxError::UnexpectedEndOfInput { line: 0, offset: 0 }.into();
        assert!(matches!(error, Error::Syntax(_)));
        assert_eq!(
            error.to_string(),
            "Unexpected end of input at line 0, offset 0"
        );
    }
}
