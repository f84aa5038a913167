use thiserror::Error;

use std::io;

use crate::token::TokenKind;
use crate::value::ValueKind;

/// Errors produced while splitting a byte buffer into tokens.
///
/// Positions are byte offsets into the input buffer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("no scanning rule matched byte {byte:#04x} at offset {position}")]
    UnmatchedByte { position: usize, byte: u8 },

    #[error("string opened at offset {position} has no closing quote")]
    UnterminatedString { position: usize },

    #[error("number at offset {position} does not fit in an i64")]
    NumberOverflow { position: usize },
}

/// Errors produced while driving the grammar over a token stream.
///
/// Positions are indices into the token sequence, not byte offsets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected {observed} at token {position}, expected one of {}", format_kinds(.expected))]
    UnexpectedToken {
        position: usize,
        observed: TokenKind,
        expected: &'static [TokenKind],
    },

    #[error("closing bracket at token {position} does not match the open container")]
    MismatchedBracket { position: usize },

    #[error("value or key stack exhausted; document nesting is malformed")]
    EmptyStack,

    #[error("trailing tokens after the document root, starting at token {position}")]
    TrailingTokens { position: usize },

    #[error("document ended before the root container was closed")]
    UnexpectedEnd,
}

fn format_kinds(kinds: &[TokenKind]) -> String {
    let parts: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
    parts.join(", ")
}

/// A value was accessed as the wrong kind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: ValueKind,
    pub found: ValueKind,
}

/// Top-level error for the convenience decode entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = core::result::Result<T, Error>;
