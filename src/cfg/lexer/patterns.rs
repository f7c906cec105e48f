//! Ordered pattern tables for the cfg lexer
//!
//! Both tables are plain ordered lists of anchored regexes. The token
//! patterns have pairwise disjoint first-byte sets, so at most one of them
//! can match at any position and the order they are tried in carries no
//! meaning. `test_token_patterns_are_mutually_exclusive` keeps it that way.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use super::tokens::{Literal, Token, TokenKind};

/// Builds the token for a matched span. `None` means the matched text could
/// not be converted (integer overflow).
type TokenBuilder = fn(&[u8]) -> Option<Token>;

/// An anchored token pattern and the builder for its token
pub struct TokenPattern {
    pub kind: TokenKind,
    pub regex: Regex,
    build: TokenBuilder,
}

impl TokenPattern {
    fn new(kind: TokenKind, pattern: &str, build: TokenBuilder) -> Self {
        Self {
            kind,
            regex: anchored(pattern),
            build,
        }
    }

    /// Length of the match at the start of `input`, if any
    pub fn match_len(&self, input: &[u8]) -> Option<usize> {
        self.regex.find(input).map(|m| m.end())
    }

    pub fn build(&self, matched: &[u8]) -> Option<Token> {
        (self.build)(matched)
    }
}

fn anchored(pattern: &str) -> Regex {
    // The tables are static; a pattern that fails to compile is a programming error.
    Regex::new(&format!("^(?-u:{})", pattern)).expect("invalid lexer pattern")
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn build_int(matched: &[u8]) -> Option<Token> {
    std::str::from_utf8(matched)
        .ok()?
        .parse::<i64>()
        .ok()
        .map(Token::int)
}

fn build_ident(matched: &[u8]) -> Option<Token> {
    Some(Token::ident(lossy(matched)))
}

fn build_string(matched: &[u8]) -> Option<Token> {
    // Strip the surrounding quotes
    Some(Token::string(lossy(&matched[1..matched.len() - 1])))
}

macro_rules! punctuation_builder {
    ($kind:expr) => {
        |matched: &[u8]| -> Option<Token> {
            Some(Token::new($kind, Literal::Str(lossy(matched))))
        }
    };
}

/// Identifier shape shared by the identifier pattern, core variables and macros
pub(crate) static IDENTIFIER: Lazy<Regex> = Lazy::new(|| anchored(r"[_a-zA-Z][_a-zA-Z0-9]*"));

/// Spans skipped between tokens: whitespace, block comments, `//` comments
/// and `#` comments that are not `#!` macros
pub(crate) static IGNORED: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        anchored(r"[ \t\r\n\x0B\x0C]+"),
        anchored(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/"),
        anchored(r"//[^\n]*"),
        // `#` then the rest of the line, a bare newline or end of input; never `#!`
        anchored(r"#(?:[^!\n][^\n]*|\n|$)"),
    ]
});

pub(crate) static TOKEN_PATTERNS: Lazy<Vec<TokenPattern>> = Lazy::new(|| {
    vec![
        TokenPattern::new(TokenKind::Int, r"[0-9]+", build_int),
        TokenPattern::new(TokenKind::Ident, r"[_a-zA-Z][_a-zA-Z0-9]*", build_ident),
        TokenPattern::new(TokenKind::String, r#""[^"]*""#, build_string),
        TokenPattern::new(TokenKind::Comma, r",", punctuation_builder!(TokenKind::Comma)),
        TokenPattern::new(
            TokenKind::Semicolon,
            r";",
            punctuation_builder!(TokenKind::Semicolon),
        ),
        TokenPattern::new(TokenKind::LParen, r"\(", punctuation_builder!(TokenKind::LParen)),
        TokenPattern::new(TokenKind::RParen, r"\)", punctuation_builder!(TokenKind::RParen)),
        TokenPattern::new(TokenKind::LBrace, r"\{", punctuation_builder!(TokenKind::LBrace)),
        TokenPattern::new(TokenKind::RBrace, r"\}", punctuation_builder!(TokenKind::RBrace)),
        TokenPattern::new(
            TokenKind::LBracket,
            r"\[",
            punctuation_builder!(TokenKind::LBracket),
        ),
        TokenPattern::new(
            TokenKind::RBracket,
            r"\]",
            punctuation_builder!(TokenKind::RBracket),
        ),
        TokenPattern::new(TokenKind::Dot, r"\.", punctuation_builder!(TokenKind::Dot)),
        TokenPattern::new(TokenKind::Colon, r":", punctuation_builder!(TokenKind::Colon)),
    ]
});

/// Two-byte operators, checked before the single-byte ones
pub(crate) const TWO_BYTE_OPERATORS: &[(&[u8; 2], TokenKind)] = &[
    (b"==", TokenKind::Eq),
    (b"!=", TokenKind::Ne),
    (b"<=", TokenKind::Le),
    (b">=", TokenKind::Ge),
    (b"&&", TokenKind::And),
    (b"||", TokenKind::Or),
    (b"++", TokenKind::Inc),
    (b"--", TokenKind::Dec),
];

pub(crate) const ONE_BYTE_OPERATORS: &[(u8, TokenKind)] = &[
    (b'=', TokenKind::Assign),
    (b'!', TokenKind::Not),
    (b'<', TokenKind::Lt),
    (b'>', TokenKind::Gt),
    (b'+', TokenKind::Add),
    (b'-', TokenKind::Sub),
    (b'*', TokenKind::Mul),
    (b'/', TokenKind::Div),
    (b'%', TokenKind::Mod),
];

/// Prefixes that introduce a preprocessor macro (`#!define`, `!!KAMAILIO`)
pub(crate) const MACRO_PREFIXES: &[&[u8; 2]] = &[b"#!", b"!!"];

#[cfg(test)]
mod tests {
    use super::*;

    fn matching_patterns(input: &[u8]) -> Vec<TokenKind> {
        TOKEN_PATTERNS
            .iter()
            .filter(|p| p.match_len(input).is_some())
            .map(|p| p.kind)
            .collect()
    }

    #[test]
    fn test_token_patterns_are_mutually_exclusive() {
        // Probe every first byte with followers that could extend any pattern.
        let followers: &[&[u8]] = &[b"", b"a", b"1", b"\"", b"_x\"", b" "];
        for first in 0u8..=255 {
            for follower in followers {
                let mut probe = vec![first];
                probe.extend_from_slice(follower);
                let matches = matching_patterns(&probe);
                assert!(
                    matches.len() <= 1,
                    "input {:?} matched several patterns: {:?}",
                    String::from_utf8_lossy(&probe),
                    matches
                );
            }
        }
    }

    #[test]
    fn test_patterns_are_anchored() {
        assert!(matching_patterns(b" 123").is_empty());
        assert!(IGNORED.iter().all(|re| re.find(b"x // y").is_none()));
    }

    #[test]
    fn test_hash_comment_excludes_macros() {
        let hash = &IGNORED[3];
        assert_eq!(hash.find(b"# comment\nx").map(|m| m.end()), Some(9));
        assert_eq!(hash.find(b"#\nx").map(|m| m.end()), Some(2));
        assert_eq!(hash.find(b"#").map(|m| m.end()), Some(1));
        assert_eq!(hash.find(b"##!x").map(|m| m.end()), Some(4));
        assert!(hash.find(b"#!define").is_none());
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let block = &IGNORED[1];
        let input = b"/* a\n * b **/ 1";
        assert_eq!(block.find(input).map(|m| m.end()), Some(13));
    }

    #[test]
    fn test_int_overflow_does_not_build() {
        let int = &TOKEN_PATTERNS[0];
        assert_eq!(int.build(b"42"), Some(Token::int(42)));
        assert_eq!(int.build(b"99999999999999999999"), None);
    }

    #[test]
    fn test_string_builder_strips_quotes() {
        let string = &TOKEN_PATTERNS[2];
        assert_eq!(string.match_len(b"\"a b\" c"), Some(5));
        assert_eq!(string.build(b"\"a b\""), Some(Token::string("a b")));
    }
}
