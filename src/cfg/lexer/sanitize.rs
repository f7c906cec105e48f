//! Post-pass over the raw token stream
//!
//! - drops newline tokens (the grammar is not line-sensitive)
//! - merges runs of adjacent string literals into one token
//! - reclassifies identifiers into keywords, route keywords and
//!   preprocessor directives

use super::lexer_impl::SpannedToken;
use super::tokens::{Literal, TokenKind};

/// Identifiers lexed as [`TokenKind::Keyword`]
pub const KEYWORDS: &[&str] = &[
    "return",
    "break",
    "case",
    "const",
    "continue",
    "default",
    "else",
    "if",
    "for",
    "switch",
    "while",
    "include_file",
    "modparam",
];

/// Identifiers lexed as [`TokenKind::Route`]
pub const ROUTE_KEYWORDS: &[&str] = &[
    "request_route",
    "reply_route",
    "failure_route",
    "onreply_route",
    "branch_route",
    "local_route",
    "startup_route",
    "route",
];

/// Identifiers lexed as [`TokenKind::Preproc`]. `include_file` and
/// `import_file` may be written without the `#!` prefix; `else` and
/// `include_file` are caught by [`KEYWORDS`] first.
pub const PREPROC_DIRECTIVES: &[&str] = &[
    "define",
    "redefine",
    "undef",
    "ifdef",
    "ifndef",
    "trydef",
    "substdefs",
    "substdef",
    "subst",
    "else",
    "endif",
    "include_file",
    "import_file",
];

fn classify_identifier(name: &str) -> TokenKind {
    if KEYWORDS.contains(&name) {
        TokenKind::Keyword
    } else if ROUTE_KEYWORDS.contains(&name) {
        TokenKind::Route
    } else if PREPROC_DIRECTIVES.contains(&name) {
        TokenKind::Preproc
    } else {
        TokenKind::Ident
    }
}

pub fn sanitize(tokens: Vec<SpannedToken>) -> Vec<SpannedToken> {
    let mut sanitized: Vec<SpannedToken> = Vec::with_capacity(tokens.len());

    for (mut token, span) in tokens {
        if token.kind == TokenKind::Newline {
            continue;
        }

        if token.kind == TokenKind::String {
            if let Some((previous, previous_span)) = sanitized.last_mut() {
                if previous.kind == TokenKind::String {
                    if let (Literal::Str(merged), Literal::Str(tail)) =
                        (&mut previous.literal, &token.literal)
                    {
                        merged.push_str(tail);
                        previous_span.end = span.end;
                        continue;
                    }
                }
            }
        }

        if token.kind == TokenKind::Ident {
            if let Literal::Str(name) = &token.literal {
                token.kind = classify_identifier(name);
            }
        }

        sanitized.push((token, span));
    }

    sanitized
}
