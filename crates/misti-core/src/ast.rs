// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Abstract Syntax Tree (AST) node definitions.

use std::fmt;

use crate::lexer::Token;

/// A primary expression. Each variant keeps the token it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "token"))]
pub enum Expr {
    /// Integer literal, decimal or hex
    Integer(Token),
    /// Floating literal
    Floating(Token),
    /// String literal, already unescaped
    String(Token),
    /// Identifier reference
    Identifier(Token),
    /// The unit value `()`
    Unit(Token),
}

impl Expr {
    /// The token this expression was built from.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Integer(token)
            | Expr::Floating(token)
            | Expr::String(token)
            | Expr::Identifier(token)
            | Expr::Unit(token) => token,
        }
    }

    /// Name of the variant, as shown to users.
    pub fn name(&self) -> &'static str {
        match self {
            Expr::Integer(_) => "Integer",
            Expr::Floating(_) => "Floating",
            Expr::String(_) => "String",
            Expr::Identifier(_) => "Identifier",
            Expr::Unit(_) => "Unit",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::String(token) => write!(f, "String({:?})", token.text),
            other => write!(f, "{}({})", other.name(), other.token().text),
        }
    }
}
