//! Compatibility-mode directives at the top of a file (`#!KAMAILIO`, ...)

use crate::cfg::ast::{Node, NodeId, NodeKind};
use crate::cfg::lexer::TokenKind;
use crate::cfg::parser::Parser;

pub const FILE_STARTERS: &[&str] = &["SER", "KAMAILIO", "OPENSER", "MAXCOMPAT", "ALL"];

pub fn file_starter(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("file starter");
    }

    let token = parser.peek();
    let directive = match token.literal.as_str() {
        Some(name) if token.kind == TokenKind::Preproc && FILE_STARTERS.contains(&name) => {
            Some(name.to_string())
        }
        _ => None,
    };
    let Some(directive) = directive else {
        return parser.expected("file starter");
    };

    let (_, span) = parser.advance();
    parser.alloc(Node::scalar(NodeKind::FileStarter, directive).with_span(Some(span)))
}
