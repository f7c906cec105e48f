//! Lexer module for the cfg dialect
//!
//! This module turns raw configuration source into an ordered token
//! sequence. Scanning is done by a hand-written cursor ([`Lexer`]) driven by
//! ordered tables of anchored regexes, followed by a [`sanitize`] pass that
//! folds multi-line strings and reclassifies identifiers. Every successful
//! tokenization ends with an `EOF` token.
//!
//! Only ASCII letters start identifiers; bytes outside the grammar are an
//! error unless illegal-character recovery is switched on.

pub mod error;
pub mod lexer_impl;
pub mod patterns;
pub mod sanitize;
pub mod tokens;

pub use error::LexError;
pub use lexer_impl::{tokenize, tokenize_with_options, tokenize_with_spans, Lexer, SpannedToken};
pub use sanitize::{sanitize, KEYWORDS, PREPROC_DIRECTIVES, ROUTE_KEYWORDS};
pub use tokens::{Literal, Token, TokenKind};
