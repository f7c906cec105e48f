//! # kamailio-cfg
//!
//! Tokenizer and parser for the Kamailio/OpenSIPS routing configuration
//! language, producing a syntax tree for editor tooling.
//!
//! ```rust,ignore
//! let tokens = kamailio_cfg::tokenize("request_route { x = 1; }")?;
//! let ast = kamailio_cfg::parse(tokens);
//! for diagnostic in ast.diagnostics(source) { ... }
//! ```

pub mod cfg;

pub use cfg::ast::{Ast, Diagnostic, NodeId, NodeKind, NodeRef};
pub use cfg::config::{FrontendConfig, LexerOptions, Loader, ParserOptions};
pub use cfg::lexer::{tokenize, tokenize_with_spans, LexError, Token, TokenKind};
pub use cfg::parser::{parse, parse_source, parse_with_options, parse_with_spans};
