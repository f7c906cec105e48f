//! Composition primitives for grammar rules
//!
//! Each combinator takes rules and returns a new rule. The contract every
//! rule must honour: a failing rule (one that returns an `Error` node) has
//! not moved the cursor. `sequence` restores the cursor itself, since it is
//! the only primitive that can fail after consuming input; the others rely
//! on their sub-rules.
//!
//! Result classes:
//! - success: any node that is neither `Empty` nor `Error`
//! - `Empty`: nothing produced, not an error
//! - `Error`: failure, carrying a diagnostic message

use crate::cfg::ast::{Node, NodeId, NodeKind};

use super::parser::Parser;

/// A grammar rule. Implemented for every `Fn(&mut Parser) -> NodeId`, so
/// plain functions and combinator results can be mixed freely.
pub trait Rule {
    fn parse(&self, parser: &mut Parser) -> NodeId;
}

impl<F> Rule for F
where
    F: Fn(&mut Parser) -> NodeId,
{
    fn parse(&self, parser: &mut Parser) -> NodeId {
        self(parser)
    }
}

/// Run `rules` in order and collect their results as children of a new
/// `kind` node. The first error aborts the sequence: the cursor is restored
/// and that error is returned. `Empty` results are skipped.
pub fn sequence<'a>(kind: NodeKind, rules: &'a [&'a dyn Rule]) -> impl Fn(&mut Parser) -> NodeId + 'a {
    move |parser: &mut Parser| {
        let start = parser.mark();
        let node = parser.alloc(Node::new(kind));

        for rule in rules {
            let result = rule.parse(parser);
            if parser.is_error(result) {
                parser.reset(start);
                return result;
            }
            if parser.is_empty(result) {
                continue;
            }
            parser.attach(node, result);
        }

        parser.cover(node);
        node
    }
}

/// First successful alternative wins; later ones are not tried. When every
/// alternative fails, the last error is returned (or `Empty` when none of
/// them produced an error).
pub fn choice<'a>(rules: &'a [&'a dyn Rule]) -> impl Fn(&mut Parser) -> NodeId + 'a {
    move |parser: &mut Parser| {
        let mut failure = parser.empty();
        for rule in rules {
            let result = rule.parse(parser);
            if parser.is_success(result) {
                return result;
            }
            if parser.is_error(result) {
                failure = result;
            }
        }
        failure
    }
}

/// `rule`'s result on success, `Empty` otherwise. Never fails.
pub fn optional<'a, R>(rule: &'a R) -> impl Fn(&mut Parser) -> NodeId + 'a
where
    R: Rule + ?Sized,
{
    move |parser: &mut Parser| {
        let result = rule.parse(parser);
        if parser.is_success(result) {
            result
        } else {
            parser.empty()
        }
    }
}

/// Apply `rule` until it stops succeeding, collecting results as children
/// of a new `kind` node. Zero matches give a node with no children. A
/// success that consumed nothing also ends the repetition.
pub fn repeat<'a, R>(kind: NodeKind, rule: &'a R) -> impl Fn(&mut Parser) -> NodeId + 'a
where
    R: Rule + ?Sized,
{
    move |parser: &mut Parser| {
        let node = parser.alloc(Node::new(kind));
        loop {
            let before = parser.position();
            let result = rule.parse(parser);
            if !parser.is_success(result) {
                break;
            }
            parser.attach(node, result);
            if parser.position() == before {
                break;
            }
        }
        parser.cover(node);
        node
    }
}
