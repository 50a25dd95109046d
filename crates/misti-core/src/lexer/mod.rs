// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Lexical analysis (tokenization) for Misti source code.
//!
//! The lexer transforms Misti source text into a stream of tokens, turning
//! leading whitespace into `Indent` and `Dedent` tokens along the way.
//!
//! ## Structure
//!
//! - `scanner.rs` - Main `Scanner` struct that produces tokens
//! - `token.rs` - `Token` and `TokenKind` definitions
//! - `cursor.rs` - Read position shared by the sub-scanners
//! - `indentation.rs` - Stack of open indentation levels
//!
//! ## Sub-scanners
//!
//! - `number` - Decimal, hex and floating literals
//! - `identifier` - Identifiers and keywords
//! - `operators` - Operator runs and grouping signs
//! - `string` - String literals and escapes
//!
//! ## Usage
//!
//! ```rust
//! use misti_core::lexer::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("val x = 42");
//!
//! while let Some(tokens) = scanner.next_token() {
//!     for token in tokens {
//!         println!("{:?}", token.kind);
//!     }
//! }
//! assert!(scanner.diagnostics().is_empty());
//! ```

mod cursor;
mod indentation;
mod scanner;
mod token;

pub mod identifier;
pub mod number;
pub mod operators;
pub mod string;

pub use cursor::{Checkpoint, Cursor, Lexeme};
pub use indentation::{IndentChange, IndentationError, IndentationStack};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
