//! Public entry points of the parser

use tracing::debug;

use crate::cfg::ast::Ast;
use crate::cfg::config::{FrontendConfig, ParserOptions};
use crate::cfg::lexer::{tokenize_with_options, LexError, SpannedToken, Token};

use super::elements::program;
use super::parser::Parser;

/// Parse a bare token sequence. Nodes carry no source ranges.
pub fn parse(tokens: Vec<Token>) -> Ast {
    let spanned = tokens.into_iter().map(|t| (t, 0..0)).collect();
    let mut ast = parse_with_options(spanned, ParserOptions::default());
    ast.clear_spans();
    ast
}

pub fn parse_with_spans(tokens: Vec<SpannedToken>) -> Ast {
    parse_with_options(tokens, ParserOptions::default())
}

/// Parse spanned tokens into a finished tree. Syntax errors are embedded as
/// `Error` nodes; this never fails.
pub fn parse_with_options(tokens: Vec<SpannedToken>, options: ParserOptions) -> Ast {
    let token_count = tokens.len();
    let mut parser = Parser::new(tokens, options);
    let root = program(&mut parser);

    let mut ast = parser.into_ast();
    ast.set_root(root);
    debug!(
        tokens = token_count,
        errors = ast.errors().len(),
        "built syntax tree"
    );
    ast
}

/// Tokenize and parse `source` with the given configuration
pub fn parse_source(source: impl AsRef<[u8]>, config: &FrontendConfig) -> Result<Ast, LexError> {
    let tokens = tokenize_with_options(source, &config.lexer)?;
    Ok(parse_with_options(tokens, config.parser.clone()))
}
