#![doc = include_str!("../README.md")]

pub mod decode;
pub mod error;
pub mod machine;
pub mod options;

mod token;
mod value;

pub use crate::decode::lexer::{Scan, ScanRule, Tokenizer, tokenize};
pub use crate::decode::parser::Parser;
pub use crate::error::{Error, LexError, ParseError, Result, TypeMismatch};
pub use crate::options::Options;
pub use crate::token::{Token, TokenKind};
pub use crate::value::{Array, Map, Value, ValueKind};

use std::io::Read;

/// Decodes one JSON document from a byte buffer.
pub fn decode_from_slice(bytes: &[u8], options: &Options) -> Result<Value> {
    let tokens = tokenize(bytes)?;
    let mut parser = Parser::with_options(*options);
    Ok(parser.parse(tokens)?)
}

/// Decodes one JSON document from a string.
pub fn decode_from_str(s: &str, options: &Options) -> Result<Value> {
    decode_from_slice(s.as_bytes(), options)
}

/// Reads a reader to the end and decodes one JSON document from it.
pub fn decode_from_reader<R: Read>(mut reader: R, options: &Options) -> Result<Value> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    decode_from_slice(&buf, options)
}
