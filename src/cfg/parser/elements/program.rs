//! Whole-file rules
//!
//! ```text
//! Program           := TopLevelStatement* EOF
//! TopLevelStatement := FileStarter | TopLevelAssignment | Route | EOF
//! ```

use tracing::debug;

use crate::cfg::ast::{Node, NodeId, NodeKind};
use crate::cfg::lexer::TokenKind;
use crate::cfg::parser::combinators::{choice, repeat, Rule};
use crate::cfg::parser::Parser;

use super::file_starter::file_starter;
use super::routes::route;
use super::statements::top_level_assignment;

/// One top-level construct wrapped in a `TopLevelStatement` node. At `EOF`
/// or once the parser has halted this yields `Empty`, which ends the
/// surrounding repetition.
pub fn top_level_statement(parser: &mut Parser) -> NodeId {
    if parser.at_eof() || parser.is_halted() {
        return parser.empty();
    }

    let rules: [&dyn Rule; 3] = [&file_starter, &top_level_assignment, &route];
    let result = choice(&rules)(parser);
    if !parser.is_success(result) {
        return diagnose(parser, result);
    }

    let wrapper = parser.alloc(Node::new(NodeKind::TopLevelStatement));
    parser.attach(wrapper, result);
    parser.cover(wrapper);
    wrapper
}

/// Pick the error that matches what the current token looked like it was
/// starting, rather than whichever alternative happened to run last
fn diagnose(parser: &mut Parser, last: NodeId) -> NodeId {
    match parser.peek_kind() {
        TokenKind::Preproc => file_starter(parser),
        TokenKind::Ident | TokenKind::CoreVariable => top_level_assignment(parser),
        TokenKind::Route => route(parser),
        _ if parser.is_error(last) => parser.expected("top level statement"),
        _ => last,
    }
}

/// Parse the whole token stream into a `Root` node ending in `Eof`
pub fn program(parser: &mut Parser) -> NodeId {
    let root = parser.alloc(Node::new(NodeKind::Root));

    loop {
        let statements = repeat(NodeKind::Root, &top_level_statement)(parser);
        if let Err(err) = parser.ast_mut().adopt_children(root, statements) {
            debug_assert!(false, "top level statements could not be adopted: {}", err);
        }
        if parser.at_eof() || parser.is_halted() {
            break;
        }

        let error = top_level_statement(parser);
        if !parser.is_error(error) {
            // Only a non-consuming success can stop the repetition here
            break;
        }
        parser.embed_error(root, error);
        if parser.is_halted() {
            break;
        }
        parser.synchronize(false);
    }

    let (_, eof_span) = parser.advance_to_eof();
    let eof = parser.alloc(Node::new(NodeKind::Eof).with_span(Some(eof_span)));
    parser.attach(root, eof);
    parser.cover(root);

    debug!(
        nodes = parser.ast().arena_len(),
        errors = parser.embedded_errors(),
        "parsed program"
    );
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::config::ParserOptions;
    use crate::cfg::lexer::tokenize_with_spans;

    fn parse(source: &str, options: ParserOptions) -> (Parser, NodeId) {
        let mut parser = Parser::new(tokenize_with_spans(source).expect("tokenize failed"), options);
        let root = program(&mut parser);
        (parser, root)
    }

    fn top_level_kinds(parser: &Parser, root: NodeId) -> Vec<NodeKind> {
        parser
            .ast()
            .get(root)
            .children()
            .map(|c| match c.kind() {
                NodeKind::TopLevelStatement => c.child(0).map(|inner| inner.kind()).unwrap_or(NodeKind::Empty),
                other => other,
            })
            .collect()
    }

    #[test]
    fn test_empty_program() {
        let (p, root) = parse("", ParserOptions::default());
        assert_eq!(top_level_kinds(&p, root), vec![NodeKind::Eof]);
    }

    #[test]
    fn test_program_sequence() {
        let source = "#!KAMAILIO\nport = 5060\nrequest_route { x = 1; }\nroute[RELAY] { }";
        let (p, root) = parse(source, ParserOptions::default());
        assert_eq!(
            top_level_kinds(&p, root),
            vec![
                NodeKind::FileStarter,
                NodeKind::Assignment,
                NodeKind::RequestRoute,
                NodeKind::Route,
                NodeKind::Eof,
            ]
        );
        assert_eq!(p.embedded_errors(), 0);
    }

    #[test]
    fn test_diagnosis_follows_leading_token() {
        let (p, root) = parse("#!define X", ParserOptions::strict());
        let error = p.ast().get(root).child(0).unwrap();
        assert_eq!(
            error.message(),
            Some("Expected `file starter` but got `define`")
        );

        let (p, root) = parse("x = ", ParserOptions::strict());
        assert_eq!(
            p.ast().get(root).child(0).unwrap().message(),
            Some("Expected `number, string or core variable` but got EOF")
        );

        let (p, root) = parse("request_route x", ParserOptions::strict());
        assert_eq!(
            p.ast().get(root).child(0).unwrap().message(),
            Some("Expected `{` but got `x`")
        );

        let (p, root) = parse("; x = 1", ParserOptions::strict());
        assert_eq!(
            p.ast().get(root).child(0).unwrap().message(),
            Some("Expected `top level statement` but got `;`")
        );
    }

    #[test]
    fn test_strict_mode_stops_at_first_error() {
        let (p, root) = parse("= 1; request_route { }", ParserOptions::strict());
        assert_eq!(
            top_level_kinds(&p, root),
            vec![NodeKind::Error, NodeKind::Eof]
        );
    }

    #[test]
    fn test_recovery_resumes_at_next_route() {
        let (p, root) = parse("= = request_route { }", ParserOptions::default());
        assert_eq!(
            top_level_kinds(&p, root),
            vec![NodeKind::Error, NodeKind::RequestRoute, NodeKind::Eof]
        );
    }

    #[test]
    fn test_max_errors_caps_recovery() {
        let options = ParserOptions {
            recover: true,
            max_errors: 2,
        };
        let (p, _) = parse("; ; ; ; ;", options);
        assert_eq!(p.embedded_errors(), 2);
    }

    #[test]
    fn test_eof_span_at_end_of_input() {
        let (p, root) = parse("x = 1", ParserOptions::default());
        let eof = p.ast().get(root).child(1).unwrap();
        assert_eq!(eof.kind(), NodeKind::Eof);
        assert_eq!(eof.span(), Some(5..5));
        assert_eq!(p.ast().get(root).span(), Some(0..5));
    }
}
