//! Property-based tests for the lexer and parser
//!
//! Inputs are stitched together from cfg fragments, some valid, some
//! broken, so the parser sees both clean files and every recovery path.

use kamailio_cfg::cfg::lexer::{tokenize_with_options, TokenKind};
use kamailio_cfg::{
    parse_with_options, tokenize, tokenize_with_spans, LexerOptions, NodeKind, ParserOptions,
};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "#!KAMAILIO\n",
    "!!SER\n",
    "#!define WITH_NAT\n",
    "debug = 2\n",
    "listen = \"udp:127.0.0.1:5060\";\n",
    "$var(x) = $avp(y);\n",
    "request_route {\n",
    "route[RELAY] {\n",
    "failure_route[1] {\n",
    "route {\n",
    "}\n",
    "x = 1;\n",
    "x = ;\n",
    "= 3;\n",
    "\"a\"\n  \"b\"\n",
    "// comment\n",
    "/* block */\n",
    "# hash comment\n",
    "if (x <= 0) { return; }\n",
    "[\n",
    "]\n",
    "$shv(a) = 1;\n",
];

fn cfg_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..24)
        .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_tokenize_is_deterministic(source in cfg_source()) {
        prop_assert_eq!(tokenize(&source), tokenize(&source));
    }

    #[test]
    fn prop_token_spans_are_ordered_and_in_bounds(source in cfg_source()) {
        let tokens = tokenize_with_spans(&source).unwrap();
        let mut last_end = 0;
        for (token, span) in &tokens {
            prop_assert!(span.start <= span.end, "{:?} {:?}", token, span);
            prop_assert!(span.end <= source.len());
            prop_assert!(span.start >= last_end, "{:?} overlaps previous token", token);
            last_end = span.end;
        }
        let (last, eof) = tokens.last().unwrap();
        prop_assert_eq!(last.kind, TokenKind::Eof);
        prop_assert_eq!(eof.clone(), source.len()..source.len());
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = tokenize(&bytes);
        let options = LexerOptions { recover_illegal_characters: true };
        // With recovery on, only malformed core variables and huge integers fail
        if let Ok(tokens) = tokenize_with_options(&bytes, &options) {
            let ast = parse_with_options(tokens, ParserOptions::default());
            prop_assert!(ast.root().is_some());
        }
    }

    #[test]
    fn prop_parse_ends_with_eof_and_stays_in_bounds(source in cfg_source()) {
        let ast = parse_with_options(tokenize_with_spans(&source).unwrap(), ParserOptions::default());
        let root = ast.root().unwrap();
        prop_assert_eq!(root.children().last().map(|c| c.kind()), Some(NodeKind::Eof));

        for id in ast.descendants(root.id()) {
            let node = ast.get(id);
            if let Some(span) = node.span() {
                prop_assert!(span.start <= span.end && span.end <= source.len());
                if let Some(parent_span) = node.parent().and_then(|p| p.span()) {
                    prop_assert!(
                        parent_span.start <= span.start && span.end <= parent_span.end,
                        "{} escapes its parent", node.kind()
                    );
                }
            }
        }
    }

    #[test]
    fn prop_parse_is_deterministic(source in cfg_source()) {
        let tokens = tokenize_with_spans(&source).unwrap();
        let first = parse_with_options(tokens.clone(), ParserOptions::default());
        let second = parse_with_options(tokens, ParserOptions::default());
        prop_assert!(first.tree_equals(&second));
    }

    #[test]
    fn prop_strict_mode_reports_at_most_one_error(source in cfg_source()) {
        let ast = parse_with_options(tokenize_with_spans(&source).unwrap(), ParserOptions::strict());
        prop_assert!(ast.errors().len() <= 1, "{}", ast);
        let root = ast.root().unwrap();
        prop_assert_eq!(root.children().last().map(|c| c.kind()), Some(NodeKind::Eof));
    }

    #[test]
    fn prop_error_budget_is_respected(source in cfg_source(), max_errors in 1usize..4) {
        let options = ParserOptions { recover: true, max_errors };
        let ast = parse_with_options(tokenize_with_spans(&source).unwrap(), options);
        prop_assert!(ast.errors().len() <= max_errors, "{}", ast);
    }
}
