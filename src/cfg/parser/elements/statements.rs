//! Assignments, statements and blocks
//!
//! ```text
//! Block      := "{" Statement* "}"
//! Statement  := Assignment ";"
//! Assignment := LHS "=" RHS
//! LHS        := Identifier | CoreVariable
//! RHS        := Number | String | CoreVariable
//! ```

use tracing::debug;

use crate::cfg::ast::{Node, NodeId, NodeKind};
use crate::cfg::lexer::TokenKind;
use crate::cfg::parser::combinators::{choice, optional, repeat, sequence, Rule};
use crate::cfg::parser::Parser;

use super::terminals::{
    assign_operator, core_variable, end_of_statement, identifier, number, string,
};

pub fn lhs(parser: &mut Parser) -> NodeId {
    let rules: [&dyn Rule; 2] = [&identifier, &core_variable];
    let result = choice(&rules)(parser);
    if parser.is_success(result) {
        result
    } else {
        parser.expected("identifier or core variable")
    }
}

pub fn rhs(parser: &mut Parser) -> NodeId {
    let rules: [&dyn Rule; 3] = [&number, &string, &core_variable];
    let result = choice(&rules)(parser);
    if parser.is_success(result) {
        result
    } else {
        parser.expected("number, string or core variable")
    }
}

/// `LHS = RHS`; the operands get the `left` and `right` roles
pub fn assignment(parser: &mut Parser) -> NodeId {
    let rules: [&dyn Rule; 3] = [&lhs, &assign_operator, &rhs];
    let node = sequence(NodeKind::Assignment, &rules)(parser);
    if !parser.is_success(node) {
        return node;
    }

    let children = parser.ast().children(node).to_vec();
    if let [left, _, right] = children[..] {
        let ast = parser.ast_mut();
        ast.set_role(left, "left");
        ast.set_role(right, "right");
    }
    node
}

pub fn statement(parser: &mut Parser) -> NodeId {
    let rules: [&dyn Rule; 2] = [&assignment, &end_of_statement];
    let node = sequence(NodeKind::Statement, &rules)(parser);
    node
}

/// An assignment outside any block; the `;` is optional there
pub fn top_level_assignment(parser: &mut Parser) -> NodeId {
    let node = assignment(parser);
    if !parser.is_success(node) {
        return node;
    }
    let eos = optional(&end_of_statement)(parser);
    if let Some(span) = parser.ast().node(eos).span.clone() {
        parser.extend_span(node, span);
    }
    node
}

/// `{ Statement* }`
///
/// A statement that fails inside the braces is embedded as an `Error` child
/// and, when recovery is enabled, parsing resumes after the next `;`. A
/// block that is never closed gets a trailing `Error` child. Only a missing
/// `{` makes the block itself fail.
pub fn block(parser: &mut Parser) -> NodeId {
    if parser.at_eof() {
        return parser.expected("{");
    }
    let Some((_, open)) = parser.consume(TokenKind::LBrace) else {
        return parser.expected("{");
    };

    let block = parser.alloc(Node::new(NodeKind::Block).with_span(Some(open)));
    loop {
        let statements = repeat(NodeKind::Block, &statement)(parser);
        let ast = parser.ast_mut();
        if let Err(err) = ast.adopt_children(block, statements) {
            debug_assert!(false, "statement list could not be adopted: {}", err);
        }

        if let Some((_, close)) = parser.consume(TokenKind::RBrace) {
            parser.extend_span(block, close);
            return block;
        }

        // A route or directive here means the `}` went missing
        let unclosed = parser.at_eof()
            || matches!(parser.peek_kind(), TokenKind::Route | TokenKind::Preproc);
        let error = if unclosed {
            parser.expected("}")
        } else {
            statement(parser)
        };
        if let Some(span) = parser.ast().node(error).span.clone() {
            parser.extend_span(block, span);
        }
        parser.embed_error(block, error);

        if unclosed || parser.is_halted() {
            debug!(embedded = parser.embedded_errors(), "block left unfinished");
            return block;
        }
        parser.synchronize(true);
    }
}
