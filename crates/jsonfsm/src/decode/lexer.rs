//! Byte-level tokenizer.
//!
//! Tokenization is driven by an ordered table of scanning rules. Each rule
//! inspects the input at the current position and reports how many bytes it
//! consumed; zero means "did not match" and the next rule is tried. The
//! first rule to consume wins.
//!
//! First-match dispatch is only correct because the table upholds a
//! structural invariant: the set of bytes each rule can start on is pairwise
//! disjoint from every other rule's. A rule that matched one byte can never
//! shadow a longer match some later rule would have produced.

use crate::error::LexError;
use crate::token::Token;

/// Outcome of one scanning rule at one position.
pub struct Scan {
    consumed: usize,
    token: Option<Token>,
}

impl Scan {
    /// The rule did not match; try the next one.
    pub fn miss() -> Self {
        Self {
            consumed: 0,
            token: None,
        }
    }

    /// Consumed `n` bytes without producing a token.
    pub fn skip(n: usize) -> Self {
        Self {
            consumed: n,
            token: None,
        }
    }

    /// Consumed `n` bytes and produced `token`.
    pub fn hit(n: usize, token: Token) -> Self {
        Self {
            consumed: n,
            token: Some(token),
        }
    }

    fn one(token: Token) -> Self {
        Self::hit(1, token)
    }
}

/// A scanning rule: full input plus the current byte offset, so rules can
/// report absolute positions in errors.
pub type ScanRule = fn(&[u8], usize) -> Result<Scan, LexError>;

/// Applies an ordered rule table to a byte buffer.
pub struct Tokenizer {
    rules: Vec<ScanRule>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// A tokenizer loaded with the JSON rule table, in fixed priority
    /// order.
    pub fn new() -> Self {
        Self::with_rules(vec![
            left_brace,
            right_brace,
            left_bracket,
            right_bracket,
            comma,
            colon,
            string,
            boolean,
            number,
            null,
            whitespace,
        ])
    }

    pub fn with_rules(rules: Vec<ScanRule>) -> Self {
        Self { rules }
    }

    /// Splits `input` into tokens.
    ///
    /// Fails with [`LexError::UnmatchedByte`] when no rule consumes the
    /// byte at the current position; the byte is never silently dropped.
    pub fn tokenize(&self, input: &[u8]) -> Result<Vec<Token>, LexError> {
        let mut out = Vec::new();
        let mut pos = 0;
        'scan: while pos < input.len() {
            for rule in &self.rules {
                let scan = rule(input, pos)?;
                if scan.consumed > 0 {
                    pos += scan.consumed;
                    if let Some(token) = scan.token {
                        out.push(token);
                    }
                    continue 'scan;
                }
            }
            return Err(LexError::UnmatchedByte {
                position: pos,
                byte: input[pos],
            });
        }
        Ok(out)
    }
}

/// Tokenizes with the default JSON rule table.
pub fn tokenize(input: &[u8]) -> Result<Vec<Token>, LexError> {
    Tokenizer::new().tokenize(input)
}

fn left_brace(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    Ok(if input[pos] == b'{' {
        Scan::one(Token::LeftBrace)
    } else {
        Scan::miss()
    })
}

fn right_brace(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    Ok(if input[pos] == b'}' {
        Scan::one(Token::RightBrace)
    } else {
        Scan::miss()
    })
}

fn left_bracket(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    Ok(if input[pos] == b'[' {
        Scan::one(Token::LeftBracket)
    } else {
        Scan::miss()
    })
}

fn right_bracket(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    Ok(if input[pos] == b']' {
        Scan::one(Token::RightBracket)
    } else {
        Scan::miss()
    })
}

fn comma(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    Ok(if input[pos] == b',' {
        Scan::one(Token::Comma)
    } else {
        Scan::miss()
    })
}

fn colon(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    Ok(if input[pos] == b':' {
        Scan::one(Token::Colon)
    } else {
        Scan::miss()
    })
}

/// Scans a quoted string. No escape processing: the token text is the raw
/// bytes between the quotes.
fn string(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    if input[pos] != b'"' {
        return Ok(Scan::miss());
    }
    let body = &input[pos + 1..];
    match find_quote(body) {
        Some(end) => {
            let text = String::from_utf8_lossy(&body[..end]).into_owned();
            Ok(Scan::hit(end + 2, Token::String(text)))
        }
        None => Err(LexError::UnterminatedString { position: pos }),
    }
}

#[inline]
#[cfg(feature = "perf_memchr")]
fn find_quote(haystack: &[u8]) -> Option<usize> {
    memchr::memchr(b'"', haystack)
}

#[inline]
#[cfg(not(feature = "perf_memchr"))]
fn find_quote(haystack: &[u8]) -> Option<usize> {
    haystack.iter().position(|&b| b == b'"')
}

fn boolean(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    let rest = &input[pos..];
    if rest.starts_with(b"true") {
        return Ok(Scan::hit(4, Token::Bool(true)));
    }
    if rest.starts_with(b"false") {
        return Ok(Scan::hit(5, Token::Bool(false)));
    }
    Ok(Scan::miss())
}

/// Greedily consumes a run of decimal digits. No sign, no fraction, no
/// exponent; a run that does not fit in an `i64` is an error rather than a
/// wrapped value.
fn number(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    let mut i = pos;
    let mut value: i64 = 0;
    while i < input.len() && input[i].is_ascii_digit() {
        let digit = i64::from(input[i] - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or(LexError::NumberOverflow { position: pos })?;
        i += 1;
    }
    if i == pos {
        return Ok(Scan::miss());
    }
    Ok(Scan::hit(i - pos, Token::Number(value)))
}

/// Requires the full `null` literal; a bare `n` prefix is left for the
/// unmatched-byte error.
fn null(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    Ok(if input[pos..].starts_with(b"null") {
        Scan::hit(4, Token::Null)
    } else {
        Scan::miss()
    })
}

fn whitespace(input: &[u8], pos: usize) -> Result<Scan, LexError> {
    Ok(match input[pos] {
        b' ' | b'\t' | b'\n' | b'\r' => Scan::skip(1),
        _ => Scan::miss(),
    })
}
