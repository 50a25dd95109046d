// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Operator and grouping-sign scanning.
//!
//! ## Operators
//!
//! Any maximal run of operator characters is a single `Operator` token:
//!
//! ```text
//! + - = * ! \ / | @ # $ ~ % & ? < > ^ . :
//! ```
//!
//! so `**=`, `<$>` and `.<.` are all one token each. Giving meaning to a
//! particular spelling is left to the parser.
//!
//! ## Grouping signs
//!
//! | Input  | Token        |
//! |--------|--------------|
//! | `()`   | `Unit "()"`  |
//! | `(  )` | `Unit "()"`  |
//! | `(`    | `LeftParen`  |
//! | `)`    | `RightParen` |
//! | `[` `]` | `LeftBracket` `RightBracket` |
//! | `{` `}` | `LeftBrace` `RightBrace` |

use super::cursor::Cursor;
use super::{Token, TokenKind};

/// Checks if a character belongs to the operator set.
pub fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-'
            | '='
            | '*'
            | '!'
            | '\\'
            | '/'
            | '|'
            | '@'
            | '#'
            | '$'
            | '~'
            | '%'
            | '&'
            | '?'
            | '<'
            | '>'
            | '^'
            | '.'
            | ':'
    )
}

/// Checks if a character is a parenthesis, bracket or brace.
pub fn is_grouping_char(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']' | '{' | '}')
}

/// Scans a run of operator characters.
pub fn scan_operator(cursor: &mut Cursor) -> Token {
    let mut lexeme = cursor.begin();
    while let Some(ch) = cursor.advance_if(is_operator_char) {
        lexeme.push(ch);
    }
    lexeme.finish(TokenKind::Operator)
}

/// Scans one grouping sign.
///
/// Returns `None`, consuming nothing, when the next character is not a
/// grouping sign.
pub fn scan_grouping_sign(cursor: &mut Cursor) -> Option<Token> {
    let sign = cursor.peek().filter(|c| is_grouping_char(*c))?;
    let mut lexeme = cursor.begin();
    cursor.advance();
    lexeme.push(sign);

    let kind = match sign {
        '(' => {
            let after_paren = cursor.checkpoint();
            cursor.eat_spaces();
            if cursor.advance_if(|c| c == ')').is_some() {
                lexeme.push(')');
                TokenKind::Unit
            } else {
                cursor.rewind(after_paren);
                TokenKind::LeftParen
            }
        }
        ')' => TokenKind::RightParen,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        '{' => TokenKind::LeftBrace,
        _ => TokenKind::RightBrace,
    };

    Some(lexeme.finish(kind))
}
