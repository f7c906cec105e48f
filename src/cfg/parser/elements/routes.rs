//! Route declarations
//!
//! ```text
//! Route     := RouteKeyword RouteName? Block
//! RouteName := "[" (Identifier | Number | String) "]"
//! ```
//!
//! The keyword picks the node kind. A bracketed name ends up as the route
//! node's role, not as a child. The generic `route` keyword needs a name;
//! without one the route is still built, with an embedded error.

use crate::cfg::ast::{Node, NodeId, NodeKind, Scalar};
use crate::cfg::lexer::TokenKind;
use crate::cfg::parser::combinators::{choice, Rule};
use crate::cfg::parser::Parser;

use super::statements::block;
use super::terminals::{identifier, number, string};

pub const ROUTE_NAME_REQUIRED: &str = "Route name is required";

/// `[ name ]`, returned as the inner `Identifier`/`Number`/`String` node
pub fn route_name(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("[");
    }
    let start = parser.mark();
    if parser.consume(TokenKind::LBracket).is_none() {
        return parser.expected("[");
    }

    let rules: [&dyn Rule; 3] = [&identifier, &number, &string];
    let name = choice(&rules)(parser);
    if !parser.is_success(name) {
        let error = parser.expected("route name");
        parser.reset(start);
        return error;
    }

    if parser.consume(TokenKind::RBracket).is_none() {
        let error = parser.expected("]");
        parser.reset(start);
        return error;
    }
    name
}

pub fn route(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("route");
    }
    let kind = match parser.peek().literal.as_str() {
        Some(keyword) if parser.peek_kind() == TokenKind::Route => {
            NodeKind::from_route_keyword(keyword)
        }
        _ => None,
    };
    let Some(kind) = kind else {
        return parser.expected("route");
    };

    let start = parser.mark();
    let (_, keyword_span) = parser.advance();
    let route = parser.alloc(Node::new(kind).with_span(Some(keyword_span)));

    let mut problem = None;
    if parser.check(TokenKind::LBracket) {
        let name = route_name(parser);
        if parser.is_error(name) {
            problem = Some(name);
            skip_past_bracket(parser);
        } else {
            let role = match parser.ast().node(name).scalar_value() {
                Some(Scalar::Str(s)) => s.clone(),
                Some(Scalar::Int(n)) => n.to_string(),
                None => String::new(),
            };
            parser.ast_mut().set_role(route, role);
        }
    } else if kind == NodeKind::Route {
        let span = parser.peek_span();
        problem = Some(parser.error(ROUTE_NAME_REQUIRED, span));
    }

    // Without a `{` the whole route fails and nothing may be embedded
    if !parser.check(TokenKind::LBrace) {
        let error = block(parser);
        parser.reset(start);
        return error;
    }

    if let Some(problem) = problem {
        parser.embed_error(route, problem);
        if let Some(span) = parser.ast().node(problem).span.clone() {
            parser.extend_span(route, span);
        }
        if parser.is_halted() {
            return route;
        }
    }

    let body = block(parser);
    parser.attach(route, body);
    if let Some(span) = parser.ast().node(body).span.clone() {
        parser.extend_span(route, span);
    }
    route
}

/// After a malformed route name: skip to just past the closing `]`, unless
/// a `{` or the end of input comes first
fn skip_past_bracket(parser: &mut Parser) {
    let mark = parser.mark();
    while !parser.at_eof() && !parser.check(TokenKind::LBrace) {
        if parser.consume(TokenKind::RBracket).is_some() {
            return;
        }
        parser.advance();
    }
    if parser.at_eof() {
        parser.reset(mark);
    }
}
