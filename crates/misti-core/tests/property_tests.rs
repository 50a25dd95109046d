//! Property-based tests for the Misti scanner.
//!
//! These tests use proptest to generate inputs and verify:
//! 1. Whitespace-only input yields a lone EOF
//! 2. Decimal integers scan to a single token
//! 3. Token text reproduces the non-whitespace input
//! 4. Independent scanners agree on every input

use misti_core::lexer::{Scanner, TokenKind};
use misti_core::tokenize;
use proptest::prelude::*;

// -- Input Generation Strategies --

/// Generate an identifier that is not a keyword.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-zA-Z0-9_]{0,12}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| s != "var" && s != "val")
}

/// Generate a decimal integer without leading zeros.
fn integer_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0".to_string()),
        prop::string::string_regex("[1-9][0-9]{0,30}").expect("valid regex"),
    ]
}

/// Generate a run of operator characters.
fn operator_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[-+=*!\\/|@#$~%&?<>^.:]{1,4}").expect("valid regex")
}

/// Generate a lexeme that contains no whitespace and decodes to itself.
fn lexeme_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        identifier_strategy(),
        integer_strategy(),
        operator_strategy(),
        prop::sample::select(vec!["[", "]", "{", "}", "val", "var"]).prop_map(String::from),
    ]
}

/// Generate whitespace that separates two lexemes.
fn separator_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![" ", "   ", "\n", "\n  ", "\n    ", "\n\n", "\n   \n  "])
        .prop_map(String::from)
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((lexeme_strategy(), separator_strategy()), 0..40).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(lexeme, sep)| lexeme + &sep)
            .collect()
    })
}

proptest! {
    #[test]
    fn whitespace_only_is_eof(src in "[ \n]{0,64}") {
        let lexed = tokenize(&src);
        prop_assert_eq!(lexed.tokens.len(), 1);
        prop_assert_eq!(lexed.tokens[0].kind, TokenKind::Eof);
        prop_assert!(lexed.is_clean());
    }

    #[test]
    fn decimal_integers_scan_whole(src in integer_strategy()) {
        let tokens = Scanner::new(&src).tokens();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::Integer);
        prop_assert_eq!(&tokens[0].text, &src);
    }

    #[test]
    fn token_text_reproduces_input(src in program_strategy()) {
        let lexed = tokenize(&src);
        let joined: String = lexed
            .tokens
            .iter()
            .filter(|t| !t.is_synthetic())
            .map(|t| t.text.as_str())
            .collect();
        let expected: String = src.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(joined, expected);
        let only_dedent_diagnostics = lexed
            .diagnostics
            .iter()
            .all(|d| matches!(d, misti_core::LexError::InconsistentDedent { .. }));
        prop_assert!(only_dedent_diagnostics);
    }

    #[test]
    fn indents_and_dedents_never_exceed(src in program_strategy()) {
        let tokens = Scanner::new(&src).tokens();
        let mut depth: i64 = 0;
        for token in &tokens {
            match token.kind {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => depth -= 1,
                _ => {}
            }
            prop_assert!(depth >= 0);
        }
    }

    #[test]
    fn scanning_is_idempotent(src in "[ -~\n]{0,80}") {
        let first = tokenize(&src);
        let second = tokenize(&src);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_input_ends_with_one_eof(src in "\\PC{0,80}") {
        let tokens = Scanner::new(&src).tokens();
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        prop_assert_eq!(eofs, 1);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}
