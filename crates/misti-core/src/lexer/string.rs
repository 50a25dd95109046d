// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! String literal scanning.
//!
//! Strings are double quoted and end at the line they start on. The token
//! text holds the decoded contents, without quotes.
//!
//! ### Escape Sequences
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\n` | Newline |
//! | `\r` | Carriage return |
//! | `\t` | Tab |
//! | `\f` | Form feed |
//! | `\b` | Backspace |
//! | `\"` | Double quote |
//! | `\\` | Backslash |
//!
//! Any other character after a backslash is kept and the backslash dropped,
//! so `"\'"` decodes to `'`.

use super::cursor::Cursor;
use super::{Token, TokenKind};
use crate::error::{Diagnostics, LexError};

/// Scans a string literal. The next character must be `"`.
///
/// An unterminated string still yields a `String` token holding what was
/// read; the problem is recorded in `diagnostics`.
pub fn scan_string(cursor: &mut Cursor, diagnostics: &mut Diagnostics) -> Token {
    let mut lexeme = cursor.begin();

    // Opening quote
    cursor.advance();

    loop {
        match cursor.peek() {
            Some('"') => {
                cursor.advance();
                break;
            }
            Some('\n') => {
                diagnostics.push(LexError::UnterminatedString {
                    line: cursor.line(),
                    offset: cursor.position(),
                });
                // The newline belongs to the string; scanning resumes on the next line.
                cursor.advance();
                break;
            }
            None => {
                diagnostics.push(LexError::UnterminatedStringAtEof {
                    line: cursor.line(),
                    offset: cursor.position(),
                });
                break;
            }
            Some('\\') => {
                cursor.advance();
                if let Some(escaped) = cursor.peek().and_then(escape) {
                    cursor.advance();
                    lexeme.push(escaped);
                }
            }
            Some(ch) => {
                cursor.advance();
                lexeme.push(ch);
            }
        }
    }

    lexeme.finish(TokenKind::String)
}

/// Maps the character after a backslash to the character it stands for.
fn escape(ch: char) -> Option<char> {
    match ch {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'f' => Some('\u{0C}'),
        'b' => Some('\u{08}'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}
