// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Parser for Misti primary expressions.
//!
//! ```text
//! expr := Integer | Floating | String | Identifier | Unit | "(" expr ")"
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use misti_core::ast::Expr;
//! use misti_core::parser::Parser;
//!
//! let mut parser = Parser::new("((42))");
//! let expr = parser.parse_expression().expect("Should parse");
//! assert!(matches!(expr, Expr::Integer(_)));
//! ```

use crate::ast::Expr;
use crate::error::{Diagnostics, SyntaxError};
use crate::lexer::{Scanner, Token, TokenKind};

/// A parser over a [`Scanner`].
pub struct Parser {
    scanner: Scanner,
    current: Token,
}

impl Parser {
    /// Creates a new parser for the given source code.
    pub fn new(source: &str) -> Self {
        Self::from_scanner(Scanner::new(source))
    }

    /// Creates a parser that reads from an already configured scanner.
    pub fn from_scanner(mut scanner: Scanner) -> Self {
        let current = Self::pull(&mut scanner);
        Self { scanner, current }
    }

    /// Lexical diagnostics recorded while reading tokens so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        self.scanner.diagnostics()
    }

    /// Consumes the parser, returning its diagnostics.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.scanner.into_diagnostics()
    }

    /// The token the parser is looking at.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Parses one primary expression.
    ///
    /// Leading `Indent` and `Dedent` tokens are skipped. Grouping parens are
    /// counted rather than recursed into, so nesting depth is unbounded.
    pub fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        let mut open_parens = Vec::new();
        loop {
            self.skip_layout();
            if self.current.kind != TokenKind::LeftParen {
                break;
            }
            let open = self.advance();
            open_parens.push((open.line, open.offset));
        }

        let expr = self.parse_primary()?;

        // Innermost paren first
        while let Some((line, offset)) = open_parens.pop() {
            if self.current.kind != TokenKind::RightParen {
                return Err(SyntaxError::MissingClosingParen { line, offset });
            }
            self.advance();
        }

        tracing::trace!(%expr, "parsed");
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let expr = match self.current.kind {
            TokenKind::Integer => Expr::Integer(self.advance()),
            TokenKind::Floating => Expr::Floating(self.advance()),
            TokenKind::String => Expr::String(self.advance()),
            TokenKind::Identifier => Expr::Identifier(self.advance()),
            TokenKind::Unit => Expr::Unit(self.advance()),
            TokenKind::Eof => {
                return Err(SyntaxError::UnexpectedEndOfInput {
                    line: self.current.line,
                    offset: self.current.offset,
                });
            }
            kind => {
                return Err(SyntaxError::UnexpectedToken {
                    kind,
                    text: self.current.text.clone(),
                    line: self.current.line,
                    offset: self.current.offset,
                });
            }
        };
        Ok(expr)
    }

    fn skip_layout(&mut self) {
        while matches!(self.current.kind, TokenKind::Indent | TokenKind::Dedent) {
            self.advance();
        }
    }

    /// Moves to the next token, returning the one just passed.
    fn advance(&mut self) -> Token {
        let next = Self::pull(&mut self.scanner);
        std::mem::replace(&mut self.current, next)
    }

    fn pull(scanner: &mut Scanner) -> Token {
        // After EOF the scanner yields nothing; keep reporting EOF where it ended.
        scanner.next().unwrap_or_else(|| {
            Token::synthetic(TokenKind::Eof, scanner.line(), scanner.offset())
        })
    }

    /// Returns true once every token has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Expr, SyntaxError> {
        Parser::new(src).parse_expression()
    }

    #[test]
    fn test_literals() {
        assert!(matches!(parse("42"), Ok(Expr::Integer(t)) if t.text == "42"));
        assert!(matches!(parse("0x1F"), Ok(Expr::Integer(t)) if t.text == "0x1F"));
        assert!(matches!(parse("1.5e-3"), Ok(Expr::Floating(t)) if t.text == "1.5e-3"));
        assert!(matches!(parse("\"hi\""), Ok(Expr::String(t)) if t.text == "hi"));
        assert!(matches!(parse("name"), Ok(Expr::Identifier(t)) if t.text == "name"));
        assert!(matches!(parse("( )"), Ok(Expr::Unit(t)) if t.text == "()"));
    }

    #[test]
    fn test_grouping() {
        let expr = parse("((x))").unwrap();
        assert_eq!(expr.token().text, "x");
        assert_eq!(expr.token().offset, 2);
    }

    #[test]
    fn test_grouping_consumes_closing_paren() {
        let mut parser = Parser::new("(1) 2");
        assert_eq!(parser.parse_expression().unwrap().token().text, "1");
        assert_eq!(parser.parse_expression().unwrap().token().text, "2");
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_missing_closing_paren() {
        assert_eq!(
            parse("  (1 2"),
            Err(SyntaxError::MissingClosingParen { line: 0, offset: 2 })
        );
        assert_eq!(
            parse("(1"),
            Err(SyntaxError::MissingClosingParen { line: 0, offset: 0 })
        );
    }

    #[test]
    fn test_end_of_input() {
        assert_eq!(
            parse(""),
            Err(SyntaxError::UnexpectedEndOfInput { line: 0, offset: 0 })
        );
        assert_eq!(
            parse("("),
            Err(SyntaxError::UnexpectedEndOfInput { line: 0, offset: 1 })
        );
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse("+ 1").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                kind: TokenKind::Operator,
                text: "+".into(),
                line: 0,
                offset: 0,
            }
        );
        assert!(matches!(parse("val"), Err(SyntaxError::UnexpectedToken { kind: TokenKind::Val, .. })));
        assert!(matches!(parse(")"), Err(SyntaxError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 200_000;
        let unclosed = "(".repeat(depth);
        assert_eq!(
            parse(&unclosed),
            Err(SyntaxError::UnexpectedEndOfInput {
                line: 0,
                offset: depth
            })
        );

        let balanced = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
        let expr = parse(&balanced).unwrap();
        assert_eq!(expr.token().text, "7");
        assert_eq!(expr.token().offset, depth);
    }

    #[test]
    fn test_innermost_unclosed_paren_is_reported() {
        assert_eq!(
            parse("( (x)"),
            Err(SyntaxError::MissingClosingParen { line: 0, offset: 0 })
        );
        assert_eq!(
            parse("((x) y)"),
            Err(SyntaxError::MissingClosingParen { line: 0, offset: 0 })
        );
        assert_eq!(
            parse("(((x) )"),
            Err(SyntaxError::MissingClosingParen { line: 0, offset: 0 })
        );
    }

    #[test]
    fn test_skips_layout_tokens() {
        assert!(matches!(parse("    x"), Ok(Expr::Identifier(_))));
    }

    #[test]
    fn test_diagnostics_are_exposed() {
        let mut parser = Parser::new("\"open");
        assert!(parser.parse_expression().is_ok());
        assert_eq!(parser.diagnostics().len(), 1);
    }

    #[test]
    fn test_keeps_reporting_eof() {
        let mut parser = Parser::new("x");
        parser.parse_expression().unwrap();
        assert!(parser.parse_expression().is_err());
        assert!(parser.parse_expression().is_err());
        assert!(parser.is_at_end());
    }
}
