// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Identifier and keyword scanning.

use super::cursor::Cursor;
use super::{Token, TokenKind};

/// Reserved words and the token kinds they scan to.
pub const KEYWORDS: &[(&str, TokenKind)] = &[("var", TokenKind::Var), ("val", TokenKind::Val)];

/// Looks up a reserved word. Case-sensitive.
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == text)
        .map(|(_, kind)| *kind)
}

/// Checks if a character can start an identifier.
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch == '_'
}

/// Checks if a character can continue an identifier.
pub fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Scans an identifier or keyword. The next character must satisfy
/// [`is_identifier_start`].
pub fn scan_identifier(cursor: &mut Cursor) -> Token {
    let mut lexeme = cursor.begin();

    if let Some(first) = cursor.advance() {
        lexeme.push(first);
    }
    while let Some(ch) = cursor.advance_if(is_identifier_continue) {
        lexeme.push(ch);
    }

    let kind = keyword(lexeme.text()).unwrap_or(TokenKind::Identifier);
    lexeme.finish(kind)
}
