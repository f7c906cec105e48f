//! Implementation of the cfg lexer
//!
//! A single forward cursor over the source bytes. Every step tries, in
//! priority order:
//!
//! 1. string continuation (a quoted run directly following a string)
//! 2. ignorable spans (whitespace, comments)
//! 3. the anchored token patterns (integer, identifier, string, punctuation)
//! 4. core variables (`$type` / `$type(name)`)
//! 5. operators, two-byte before one-byte
//! 6. preprocessor macros (`#!name`, `!!name`)
//!
//! and restarts from the top after any match. When nothing matches the scan
//! fails with [`LexError::IllegalCharacter`], unless illegal-character
//! recovery is enabled in [`LexerOptions`].

use std::ops::Range;

use tracing::{debug, trace};

use super::error::LexError;
use super::patterns::{
    IDENTIFIER, IGNORED, MACRO_PREFIXES, ONE_BYTE_OPERATORS, TOKEN_PATTERNS, TWO_BYTE_OPERATORS,
};
use super::sanitize::sanitize;
use super::tokens::{Literal, Token, TokenKind};
use crate::cfg::config::LexerOptions;

/// Token paired with the byte range it was read from
pub type SpannedToken = (Token, Range<usize>);

/// Bytes of input shown in an illegal-character error
const CONTEXT_LEN: usize = 20;

const SIGIL: u8 = b'$';
const QUOTE: u8 = b'"';

/// Cursor-based scanner over a byte buffer
pub struct Lexer<'src> {
    input: &'src [u8],
    pos: usize,
    /// Set after a string token; an opening quote is then read as a
    /// continuation of the same logical string
    in_string_continuation: bool,
    options: LexerOptions,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src [u8]) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    pub fn with_options(input: &'src [u8], options: LexerOptions) -> Self {
        Self {
            input,
            pos: 0,
            in_string_continuation: false,
            options,
        }
    }

    fn rest(&self) -> &'src [u8] {
        &self.input[self.pos..]
    }

    fn current(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos + 1).copied()
    }

    /// Scan the whole input into raw (unsanitized) tokens
    pub fn scan(&mut self) -> Result<Vec<SpannedToken>, LexError> {
        let mut tokens = Vec::new();

        while self.pos < self.input.len() {
            if self.in_string_continuation && self.current() == Some(QUOTE) {
                tokens.push(self.read_continued_string());
                self.in_string_continuation = false;
                continue;
            }

            if self.skip_ignored() {
                continue;
            }

            let start = self.pos;
            let token = match self.read_pattern(start)? {
                Some(token) => token,
                None => match self.read_next_special(start)? {
                    Some(token) => token,
                    None => self.illegal_character(start)?,
                },
            };

            self.in_string_continuation = token.kind == TokenKind::String;
            trace!(kind = ?token.kind, literal = %token.literal, start, end = self.pos, "token");
            tokens.push((token, start..self.pos));
        }

        Ok(tokens)
    }

    /// Steps 4 to 6: core variables, operators, macros
    fn read_next_special(&mut self, start: usize) -> Result<Option<Token>, LexError> {
        if let Some(token) = self.read_core_variable(start)? {
            return Ok(Some(token));
        }
        if let Some(token) = self.read_operator() {
            return Ok(Some(token));
        }
        Ok(self.read_macro())
    }

    fn skip_ignored(&mut self) -> bool {
        let rest = self.rest();
        for re in IGNORED.iter() {
            if let Some(m) = re.find(rest) {
                if m.end() > 0 {
                    self.pos += m.end();
                    return true;
                }
            }
        }
        false
    }

    fn read_pattern(&mut self, start: usize) -> Result<Option<Token>, LexError> {
        let rest = self.rest();
        for pattern in TOKEN_PATTERNS.iter() {
            let Some(len) = pattern.match_len(rest) else {
                continue;
            };
            let matched = &rest[..len];
            let token = pattern
                .build(matched)
                .ok_or_else(|| LexError::IntegerOverflow {
                    literal: String::from_utf8_lossy(matched).into_owned(),
                    position: start,
                })?;
            self.pos += len;
            return Ok(Some(token));
        }
        Ok(None)
    }

    /// Reads from an opening quote to the next quote or to end of input
    fn read_continued_string(&mut self) -> SpannedToken {
        let start = self.pos;
        let body_start = start + 1;
        let body_end = self.input[body_start..]
            .iter()
            .position(|&b| b == QUOTE)
            .map(|offset| body_start + offset);

        let (body, end) = match body_end {
            Some(close) => (&self.input[body_start..close], close + 1),
            None => (&self.input[body_start..], self.input.len()),
        };
        self.pos = end;

        let token = Token::string(String::from_utf8_lossy(body).into_owned());
        trace!(literal = %token.literal, start, end, "continued string");
        (token, start..end)
    }

    fn read_identifier(&mut self) -> String {
        let len = IDENTIFIER.find(self.rest()).map_or(0, |m| m.end());
        let ident = String::from_utf8_lossy(&self.rest()[..len]).into_owned();
        self.pos += len;
        ident
    }

    /// `$` followed by a letter starts a core variable
    fn read_core_variable(&mut self, start: usize) -> Result<Option<Token>, LexError> {
        if self.current() != Some(SIGIL) || !self.peek().is_some_and(|b| b.is_ascii_alphabetic())
        {
            return Ok(None);
        }
        self.pos += 1;
        let var_type = self.read_identifier();

        let mut var_name = String::new();
        if self.current() == Some(b'(') {
            self.pos += 1;
            var_name = self.read_identifier();
            if self.current() != Some(b')') {
                return Err(LexError::UnterminatedCoreVariable { position: start });
            }
            self.pos += 1;
        }

        Ok(Some(Token::core_variable(var_type, var_name)))
    }

    fn read_operator(&mut self) -> Option<Token> {
        let rest = self.rest();

        if rest.len() >= 2 {
            let pair = [rest[0], rest[1]];
            // `!!` belongs to the macro reader
            if MACRO_PREFIXES.iter().any(|prefix| **prefix == pair) {
                return None;
            }
            if let Some((op, kind)) = TWO_BYTE_OPERATORS.iter().find(|(op, _)| **op == pair) {
                self.pos += 2;
                return Some(Token::text(*kind, String::from_utf8_lossy(*op)));
            }
        }

        let first = *rest.first()?;
        let (_, kind) = ONE_BYTE_OPERATORS.iter().find(|(op, _)| *op == first)?;
        self.pos += 1;
        Some(Token::text(*kind, char::from(first)))
    }

    fn read_macro(&mut self) -> Option<Token> {
        let rest = self.rest();
        if rest.len() < 2 || !MACRO_PREFIXES.iter().any(|prefix| rest.starts_with(*prefix)) {
            return None;
        }
        self.pos += 2;
        let name = self.read_identifier();
        Some(Token::text(TokenKind::Preproc, name))
    }

    fn illegal_character(&mut self, start: usize) -> Result<Token, LexError> {
        let byte = self.input[start];
        if self.options.recover_illegal_characters {
            debug!(byte, position = start, "illegal character, continuing");
            self.pos += 1;
            return Ok(Token::new(
                TokenKind::Illegal,
                Literal::Str(String::from_utf8_lossy(&[byte]).into_owned()),
            ));
        }

        let end = (start + CONTEXT_LEN).min(self.input.len());
        Err(LexError::IllegalCharacter {
            byte,
            position: start,
            context: String::from_utf8_lossy(&self.input[start..end]).into_owned(),
        })
    }
}

/// Tokenize a source buffer: scan, sanitize, append `EOF`
pub fn tokenize(source: impl AsRef<[u8]>) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_with_spans(source)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}

/// Tokenize a source buffer, keeping the byte range of every token
pub fn tokenize_with_spans(source: impl AsRef<[u8]>) -> Result<Vec<SpannedToken>, LexError> {
    tokenize_with_options(source, &LexerOptions::default())
}

pub fn tokenize_with_options(
    source: impl AsRef<[u8]>,
    options: &LexerOptions,
) -> Result<Vec<SpannedToken>, LexError> {
    let input = source.as_ref();
    let raw = Lexer::with_options(input, options.clone()).scan()?;
    let mut tokens = sanitize(raw);
    tokens.push((Token::eof(), input.len()..input.len()));
    debug!(tokens = tokens.len(), bytes = input.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokenization() {
        let tokens = tokenize("123 identifier \"hello\"").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::int(123),
                Token::ident("identifier"),
                Token::string("hello"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![Token::eof()]);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(tokenize("  \t\n  ").unwrap(), vec![Token::eof()]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(kinds("// line\n123"), vec![TokenKind::Int, TokenKind::Eof]);
        assert_eq!(
            kinds("/* multi \n line */ 123"),
            vec![TokenKind::Int, TokenKind::Eof]
        );
        assert_eq!(
            kinds("# hash\n## also\n123"),
            vec![TokenKind::Int, TokenKind::Eof]
        );
    }

    #[test]
    fn test_hash_comment_does_not_swallow_next_line() {
        assert_eq!(kinds("#\nx"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_two_byte_operators_win() {
        let tokens = tokenize("x <= 0").unwrap();
        assert_eq!(tokens[1], Token::text(TokenKind::Le, "<="));
        assert_eq!(tokens.len(), 4);

        assert_eq!(
            kinds("== != >= && || ++ --"),
            vec![
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Ge,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Inc,
                TokenKind::Dec,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_one_byte_operators() {
        assert_eq!(
            kinds("= ! < > + - * / %"),
            vec![
                TokenKind::Assign,
                TokenKind::Not,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Add,
                TokenKind::Sub,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Mod,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_core_variable() {
        let tokens = tokenize("$var(x) = 123;").unwrap();
        assert_eq!(tokens[0], Token::core_variable("var", "x"));
        assert_eq!(tokens[1], Token::text(TokenKind::Assign, "="));
    }

    #[test]
    fn test_core_variable_without_name() {
        let tokens = tokenize("$ru").unwrap();
        assert_eq!(tokens, vec![Token::core_variable("ru", ""), Token::eof()]);
    }

    #[test]
    fn test_unterminated_core_variable() {
        let err = tokenize("$var(x = 1").unwrap_err();
        assert_eq!(err, LexError::UnterminatedCoreVariable { position: 0 });
    }

    #[test]
    fn test_sigil_without_letter_is_illegal() {
        let err = tokenize("$1").unwrap_err();
        assert!(matches!(
            err,
            LexError::IllegalCharacter {
                byte: b'$',
                position: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_macros() {
        assert_eq!(
            tokenize("#!KAMAILIO").unwrap(),
            vec![Token::text(TokenKind::Preproc, "KAMAILIO"), Token::eof()]
        );
        assert_eq!(
            tokenize("!!KAMAILIO").unwrap(),
            vec![Token::text(TokenKind::Preproc, "KAMAILIO"), Token::eof()]
        );
    }

    #[test]
    fn test_illegal_character() {
        let err = tokenize("x = @foo").unwrap_err();
        assert_eq!(
            err,
            LexError::IllegalCharacter {
                byte: b'@',
                position: 4,
                context: "@foo".to_string(),
            }
        );
    }

    #[test]
    fn test_illegal_character_recovery() {
        let options = LexerOptions {
            recover_illegal_characters: true,
        };
        let tokens = tokenize_with_options("x @ 1", &options).unwrap();
        let kinds: Vec<_> = tokens.iter().map(|(t, _)| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Illegal,
                TokenKind::Int,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[1].1, 2..3);
    }

    #[test]
    fn test_integer_overflow() {
        let err = tokenize("x = 99999999999999999999").unwrap_err();
        assert_eq!(
            err,
            LexError::IntegerOverflow {
                literal: "99999999999999999999".to_string(),
                position: 4,
            }
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize_with_spans("x = \"ab\";").unwrap();
        let spans: Vec<_> = tokens.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(spans, vec![0..1, 2..3, 4..8, 8..9, 9..9]);
    }

    #[test]
    fn test_unterminated_continuation_reads_to_end() {
        let tokens = tokenize("\"a\" \"bc").unwrap();
        assert_eq!(tokens, vec![Token::string("abc"), Token::eof()]);
    }

    #[test]
    fn test_continuation_ends_after_other_token() {
        // Only a quote directly following a string continues it
        let err = tokenize("\"a\" x \"bc").unwrap_err();
        assert!(matches!(
            err,
            LexError::IllegalCharacter { byte: b'"', .. }
        ));
    }

    #[test]
    fn test_non_utf8_input_in_comment() {
        let source: &[u8] = b"/* \xff\xfe */ 1";
        assert_eq!(
            tokenize(source).unwrap(),
            vec![Token::int(1), Token::eof()]
        );
    }
}
