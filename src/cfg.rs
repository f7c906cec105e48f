//! Front end for the Kamailio/OpenSIPS routing configuration language
//!
//! source bytes → [`lexer`] → spanned tokens → [`parser`] → [`ast::Ast`]
//!
//! Lexical failures abort tokenization (unless illegal-character recovery is
//! on); syntax errors are embedded in the tree as `Error` nodes.

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexer;
pub mod parser;

#[cfg(test)]
pub mod testing;
