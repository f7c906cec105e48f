//! Lexical error types
//!
//! Lexical failures abort the whole tokenization call: no partial token
//! list is returned alongside a [`LexError`].

use thiserror::Error;

/// A terminating failure of the cfg lexer. Positions are byte offsets into
/// the source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No ignore rule, pattern, operator or macro matched the current byte
    #[error("illegal character '{}' at byte {position}, near `{context}`", escape_byte(.byte))]
    IllegalCharacter {
        byte: u8,
        position: usize,
        /// A short excerpt of the input starting at `position`
        context: String,
    },

    /// `$type(name` without the closing parenthesis
    #[error("unterminated core variable at byte {position}")]
    UnterminatedCoreVariable { position: usize },

    #[error("integer literal `{literal}` at byte {position} does not fit in 64 bits")]
    IntegerOverflow { literal: String, position: usize },
}

fn escape_byte(byte: &u8) -> String {
    char::from(*byte).escape_default().to_string()
}

impl LexError {
    /// Byte offset the error points at
    pub fn position(&self) -> usize {
        match self {
            LexError::IllegalCharacter { position, .. }
            | LexError::UnterminatedCoreVariable { position }
            | LexError::IntegerOverflow { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_character_message() {
        let err = LexError::IllegalCharacter {
            byte: b'@',
            position: 4,
            context: "@foo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "illegal character '@' at byte 4, near `@foo`"
        );
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn test_control_byte_is_escaped() {
        let err = LexError::IllegalCharacter {
            byte: 0x07,
            position: 0,
            context: String::new(),
        };
        assert!(err.to_string().starts_with("illegal character '\\u{7}'"));
    }
}
