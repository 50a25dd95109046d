// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Rendering of tokens, expressions and diagnostics.

use misti_core::{Expr, LexError, Token, TokenKind};
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use std::fmt::{Display, Write};

/// Output format for the command-line driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Colored, human readable text
    #[default]
    Pretty,
    /// One JSON document on stdout
    Json,
}

/// The result of processing one source.
#[derive(Debug, Serialize)]
pub struct Report {
    /// File path, or `<eval>`
    pub source: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub diagnostics: Vec<LexError>,
}

/// What processing a source produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Tokens(Vec<Token>),
    Expr(Expr),
    Error(String),
}

impl Report {
    /// Returns true when the run should exit with failure.
    pub fn has_problems(&self) -> bool {
        !self.diagnostics.is_empty() || matches!(self.outcome, Outcome::Error(_))
    }
}

/// Serializes reports as a pretty-printed JSON array.
pub fn to_json(reports: &[Report]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Text renderer honoring the color and position settings.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub color: bool,
    pub show_positions: bool,
}

impl Printer {
    fn paint<D: Display>(&self, value: D, style: Style) -> String {
        if self.color {
            value.style(style).to_string()
        } else {
            value.to_string()
        }
    }

    /// One token per line.
    pub fn tokens(&self, tokens: &[Token]) -> String {
        let mut out = String::new();
        for token in tokens {
            let _ = write!(out, "{}", self.paint(token, token_style(token.kind)));
            if self.show_positions {
                let _ = write!(
                    out,
                    " {}",
                    self.paint(format_args!("@ {}:{}", token.line, token.offset), Style::new().dimmed())
                );
            }
            out.push('\n');
        }
        out
    }

    pub fn expr(&self, expr: &Expr) -> String {
        let mut out = self.paint(expr, token_style(expr.token().kind));
        if self.show_positions {
            let token = expr.token();
            let _ = write!(
                out,
                " {}",
                self.paint(format_args!("@ {}:{}", token.line, token.offset), Style::new().dimmed())
            );
        }
        out
    }

    /// `Error: <reason> (line L, offset O)`
    pub fn diagnostic(&self, diagnostic: &LexError) -> String {
        format!(
            "{}: {} {}",
            self.paint("Error", Style::new().red().bold()),
            diagnostic,
            self.paint(
                format_args!("(line {}, offset {})", diagnostic.line(), diagnostic.offset()),
                Style::new().dimmed()
            )
        )
    }

    pub fn error(&self, message: &str) -> String {
        format!("{}: {}", self.paint("Error", Style::new().red().bold()), message)
    }

    pub fn heading(&self, source: &str) -> String {
        self.paint(format_args!("==> {source} <=="), Style::new().white().bold())
    }

    /// Prints a report: results to stdout, problems to stderr.
    pub fn print_report(&self, report: &Report, heading: bool) {
        if heading {
            println!("{}", self.heading(&report.source));
        }
        match &report.outcome {
            Outcome::Tokens(tokens) => print!("{}", self.tokens(tokens)),
            Outcome::Expr(expr) => println!("{}", self.expr(expr)),
            Outcome::Error(message) => eprintln!("{}", self.error(message)),
        }
        for diagnostic in &report.diagnostics {
            eprintln!("{}", self.diagnostic(diagnostic));
        }
    }
}

/// Color used for a token kind, here and in the REPL highlighter.
pub fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Var | TokenKind::Val => Style::new().magenta().bold(),
        TokenKind::Integer | TokenKind::Floating => Style::new().yellow(),
        TokenKind::String => Style::new().green(),
        TokenKind::Operator => Style::new().cyan(),
        TokenKind::Unit
        | TokenKind::LeftParen
        | TokenKind::RightParen
        | TokenKind::LeftBracket
        | TokenKind::RightBracket
        | TokenKind::LeftBrace
        | TokenKind::RightBrace => Style::new().bright_yellow(),
        TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof => Style::new().dimmed(),
        TokenKind::Identifier => Style::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: Printer = Printer {
        color: false,
        show_positions: false,
    };

    #[test]
    fn test_plain_tokens() {
        let tokens = misti_core::tokenize("val x").tokens;
        assert_eq!(PLAIN.tokens(&tokens), "Val \"val\"\nIdentifier \"x\"\nEOF\n");
    }

    #[test]
    fn test_positions() {
        let printer = Printer {
            color: false,
            show_positions: true,
        };
        let tokens = misti_core::tokenize("\n  x").tokens;
        assert_eq!(
            printer.tokens(&tokens),
            "Indent @ 1:3\nIdentifier \"x\" @ 1:3\nEOF @ 1:4\n"
        );
    }

    #[test]
    fn test_diagnostic() {
        let lexed = misti_core::tokenize("a ;");
        assert_eq!(
            PLAIN.diagnostic(&lexed.diagnostics[0]),
            "Error: Unrecognized character ';'. (line 0, offset 2)"
        );
    }

    #[test]
    fn test_colored_output_differs() {
        let printer = Printer {
            color: true,
            show_positions: false,
        };
        let tokens = misti_core::tokenize("1").tokens;
        assert_ne!(printer.tokens(&tokens), PLAIN.tokens(&tokens));
    }

    #[test]
    fn test_json_report() {
        let lexed = misti_core::tokenize("0x20");
        let report = Report {
            source: "<eval>".into(),
            outcome: Outcome::Tokens(lexed.tokens),
            diagnostics: lexed.diagnostics,
        };
        assert!(!report.has_problems());

        let json: serde_json::Value = serde_json::from_str(&to_json(&[report]).unwrap()).unwrap();
        assert_eq!(json[0]["source"], "<eval>");
        assert_eq!(json[0]["tokens"][0]["kind"], "Integer");
        assert_eq!(json[0]["tokens"][0]["text"], "0x20");
        assert_eq!(json[0]["diagnostics"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_error_report() {
        let report = Report {
            source: "missing.mt".into(),
            outcome: Outcome::Error("not found".into()),
            diagnostics: Vec::new(),
        };
        assert!(report.has_problems());
        assert_eq!(PLAIN.error("not found"), "Error: not found");
    }
}
