// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Number literal scanning.
//!
//! ```text
//! Number         = HexInteger | Decimal Fraction? Exponent?
//! Decimal        = [1-9] [0-9]* | "0"
//! HexInteger     = "0" [xX] [0-9a-fA-F]+
//! Fraction       = "." [0-9]+
//! Exponent       = [eE] [+-] [0-9]+
//! ```
//!
//! Every optional part is only taken when it is complete. Otherwise the
//! characters stay in the input for the next token:
//!
//! | Input    | Token          | Left over |
//! |----------|----------------|-----------|
//! | `0x20`   | `Integer 0x20` |           |
//! | `0xg`    | `Integer 0`    | `xg`      |
//! | `0123`   | `Integer 0`    | `123`     |
//! | `15.abs` | `Integer 15`   | `.abs`    |
//! | `1.5e-3` | `Floating`     |           |
//! | `100e+`  | `Integer 100`  | `e+`      |

use super::cursor::{Cursor, Lexeme};
use super::{Token, TokenKind};

/// Scans one number. The next character must be an ASCII digit.
pub fn scan_number(cursor: &mut Cursor) -> Token {
    let mut lexeme = cursor.begin();

    let Some(first) = cursor.advance() else {
        return lexeme.finish(TokenKind::Integer);
    };
    debug_assert!(first.is_ascii_digit());
    lexeme.push(first);

    if first == '0' {
        if matches!(cursor.peek(), Some('x' | 'X')) && is_hex_digit(cursor.peek2()) {
            return scan_hex_digits(cursor, lexeme);
        }
    } else {
        eat_digits(cursor, &mut lexeme);
    }

    let mut kind = TokenKind::Integer;
    if scan_fraction(cursor, &mut lexeme) {
        kind = TokenKind::Floating;
    }
    if scan_exponent(cursor, &mut lexeme) {
        kind = TokenKind::Floating;
    }

    lexeme.finish(kind)
}

fn scan_hex_digits(cursor: &mut Cursor, mut lexeme: Lexeme) -> Token {
    // 'x' or 'X'
    if let Some(marker) = cursor.advance() {
        lexeme.push(marker);
    }
    while let Some(ch) = cursor.advance_if(|c| c.is_ascii_hexdigit()) {
        lexeme.push(ch);
    }
    lexeme.finish(TokenKind::Integer)
}

fn scan_fraction(cursor: &mut Cursor, lexeme: &mut Lexeme) -> bool {
    if cursor.peek() != Some('.') || !is_digit(cursor.peek2()) {
        return false;
    }
    if let Some(dot) = cursor.advance() {
        lexeme.push(dot);
    }
    eat_digits(cursor, lexeme);
    true
}

fn scan_exponent(cursor: &mut Cursor, lexeme: &mut Lexeme) -> bool {
    let complete = matches!(cursor.peek(), Some('e' | 'E'))
        && matches!(cursor.peek2(), Some('+' | '-'))
        && is_digit(cursor.peek3());
    if !complete {
        return false;
    }
    for _ in 0..2 {
        if let Some(ch) = cursor.advance() {
            lexeme.push(ch);
        }
    }
    eat_digits(cursor, lexeme);
    true
}

fn eat_digits(cursor: &mut Cursor, lexeme: &mut Lexeme) {
    while let Some(ch) = cursor.advance_if(|c| c.is_ascii_digit()) {
        lexeme.push(ch);
    }
}

fn is_digit(ch: Option<char>) -> bool {
    ch.is_some_and(|c| c.is_ascii_digit())
}

fn is_hex_digit(ch: Option<char>) -> bool {
    ch.is_some_and(|c| c.is_ascii_hexdigit())
}
