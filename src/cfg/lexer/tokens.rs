//! Token definitions for the cfg dialect
//!
//! A token is a classified lexical unit: a [`TokenKind`] plus the literal
//! payload it was built from. Core variables (`$var(name)`, `$avp(name)`)
//! carry both captured strings in a dedicated literal variant.

use serde::Serialize;
use std::fmt;

/// All possible token kinds produced by the cfg lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Punctuation
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Dot,
    Colon,

    // Operators
    Assign,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,

    // Literals
    Ident,
    Int,
    String,

    // Reclassified identifiers
    Keyword,
    Preproc,
    Route,

    CoreVariable,

    /// Line break. The scanner skips whitespace, so this only appears in
    /// hand-built streams; `sanitize` drops it.
    Newline,
    /// Unrecognised byte, only emitted when illegal-character recovery is on
    Illegal,
    Eof,
}

impl TokenKind {
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::Eq
                | TokenKind::Ne
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::Add
                | TokenKind::Sub
                | TokenKind::Mul
                | TokenKind::Div
                | TokenKind::Mod
                | TokenKind::Inc
                | TokenKind::Dec
        )
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Dot
                | TokenKind::Colon
        )
    }
}

/// Literal payload of a token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Literal {
    /// Only the end-of-file token has no literal
    None,
    Str(String),
    Int(i64),
    CoreVariable { var_type: String, var_name: String },
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => Ok(()),
            Literal::Str(s) => write!(f, "{}", s),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::CoreVariable { var_type, var_name } if var_name.is_empty() => {
                write!(f, "${}", var_type)
            }
            Literal::CoreVariable { var_type, var_name } => {
                write!(f, "${}({})", var_type, var_name)
            }
        }
    }
}

/// A classified lexical unit. Tokens are immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Literal,
}

impl Token {
    pub fn new(kind: TokenKind, literal: Literal) -> Self {
        Self { kind, literal }
    }

    /// Token whose literal is a string (identifiers, punctuation, operators, ...)
    pub fn text(kind: TokenKind, text: impl Into<String>) -> Self {
        Self::new(kind, Literal::Str(text.into()))
    }

    pub fn int(value: i64) -> Self {
        Self::new(TokenKind::Int, Literal::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::text(TokenKind::String, value)
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::text(TokenKind::Ident, name)
    }

    pub fn core_variable(var_type: impl Into<String>, var_name: impl Into<String>) -> Self {
        Self::new(
            TokenKind::CoreVariable,
            Literal::CoreVariable {
                var_type: var_type.into(),
                var_name: var_name.into(),
            },
        )
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, Literal::None)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// True when this is a string-literal token of `kind` with exactly `text`
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.literal.as_str() == Some(text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::String => write!(f, "\"{}\"", self.literal),
            _ => write!(f, "{}", self.literal),
        }
    }
}
