// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! # misti-core
//!
//! The lexer for the Misti programming language, implemented in Rust.
//!
//! ## Overview
//!
//! This crate provides:
//! - A scanner turning source text into tokens, with `Indent`/`Dedent`
//!   tokens for significant whitespace
//! - Non-fatal, located diagnostics for lexical errors
//! - A small primary-expression parser on top of the token stream
//!
//! ## Quick Start
//!
//! ```rust
//! use misti_core::lexer::TokenKind;
//!
//! let lexed = misti_core::tokenize("val x = 0x20");
//! assert_eq!(lexed.tokens[0].kind, TokenKind::Val);
//! assert!(lexed.diagnostics.is_empty());
//!
//! let expr = misti_core::parse("(\"hi\")").expect("Should parse");
//! assert_eq!(expr.token().text, "hi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::Expr;
pub use error::{ConstructionError, Diagnostics, Error, LexError, Result, SyntaxError};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::Parser;

/// The output of scanning one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lexed {
    /// Every token, ending with exactly one EOF
    pub tokens: Vec<Token>,
    /// Lexical diagnostics in the order they were found
    pub diagnostics: Vec<LexError>,
}

impl Lexed {
    /// Returns true when no diagnostics were recorded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Scans a whole source text.
pub fn tokenize(source: &str) -> Lexed {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.tokens();
    tracing::debug!(
        tokens = tokens.len(),
        diagnostics = scanner.diagnostics().len(),
        "tokenized"
    );
    Lexed {
        tokens,
        diagnostics: scanner.into_diagnostics().into_vec(),
    }
}

/// Scans several independent sources, in parallel when the `parallel`
/// feature is enabled. Results keep the order of `sources`.
pub fn tokenize_all<S: AsRef<str> + Sync>(sources: &[S]) -> Vec<Lexed> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        sources.par_iter().map(|s| tokenize(s.as_ref())).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        sources.iter().map(|s| tokenize(s.as_ref())).collect()
    }
}

/// Parses one primary expression from `source`.
pub fn parse(source: &str) -> Result<Expr> {
    let mut parser = Parser::new(source);
    Ok(parser.parse_expression()?)
}
