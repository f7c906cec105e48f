//! Single-token rules: identifiers, literals, operators and core variables

use crate::cfg::ast::{Node, NodeId, NodeKind};
use crate::cfg::lexer::{Literal, TokenKind};
use crate::cfg::parser::Parser;

pub fn identifier(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("identifier");
    }
    match parser.consume(TokenKind::Ident) {
        Some((token, span)) => parser.alloc(
            Node::scalar(NodeKind::Identifier, token.literal.to_string()).with_span(Some(span)),
        ),
        None => parser.expected("identifier"),
    }
}

pub fn number(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("number");
    }
    match (parser.peek_kind(), parser.peek().literal.as_int()) {
        (TokenKind::Int, Some(value)) => {
            let (_, span) = parser.advance();
            parser.alloc(Node::scalar(NodeKind::Number, value).with_span(Some(span)))
        }
        _ => parser.expected("number"),
    }
}

pub fn string(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("string");
    }
    match parser.consume(TokenKind::String) {
        Some((token, span)) => parser.alloc(
            Node::scalar(NodeKind::String, token.literal.to_string()).with_span(Some(span)),
        ),
        None => parser.expected("string"),
    }
}

/// `=`, kept in the tree as an `Operator` node
pub fn assign_operator(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("=");
    }
    match parser.consume(TokenKind::Assign) {
        Some((_, span)) => {
            parser.alloc(Node::scalar(NodeKind::Operator, "=").with_span(Some(span)))
        }
        None => parser.expected("="),
    }
}

/// `;`
pub fn end_of_statement(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected(";");
    }
    match parser.consume(TokenKind::Semicolon) {
        Some((_, span)) => parser.alloc(Node::new(NodeKind::Eos).with_span(Some(span))),
        None => parser.expected(";"),
    }
}

/// `$var(name)` or `$avp(name)`: a `CoreVarVar`/`CoreVarAvp` node with one
/// `Identifier` child holding the name. Other variable types are rejected
/// without consuming.
pub fn core_variable(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("core variable");
    }
    let Literal::CoreVariable { var_type, var_name } = parser.peek().literal.clone() else {
        return parser.expected("core variable");
    };

    let kind = match var_type.as_str() {
        "var" => NodeKind::CoreVarVar,
        "avp" => NodeKind::CoreVarAvp,
        _ => {
            let message = format!(
                "Unsupported core variable `{}`, expected `$var` or `$avp`",
                parser.peek()
            );
            let span = parser.peek_span();
            return parser.error(message, span);
        }
    };

    let (_, span) = parser.advance();
    let variable = parser.alloc(Node::new(kind).with_span(Some(span.clone())));
    let name = parser.alloc(Node::scalar(NodeKind::Identifier, var_name).with_span(Some(span)));
    parser.attach(variable, name);
    variable
}
