use jsonfsm::{LexError, Token, tokenize};

#[test]
fn splits_structural_symbols_and_payloads() {
    let tokens = tokenize(br#"{"a":12}"#).unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::LeftBrace,
            Token::String("a".into()),
            Token::Colon,
            Token::Number(12),
            Token::RightBrace,
        ]
    );
}

#[test]
fn whitespace_emits_no_tokens() {
    let tokens = tokenize(b" \t\r\n[ 1 ,\n2 ]\n").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::LeftBracket,
            Token::Number(1),
            Token::Comma,
            Token::Number(2),
            Token::RightBracket,
        ]
    );
}

#[test]
fn literals_decode_to_payloads() {
    let tokens = tokenize(b"[true,false,null]").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::LeftBracket,
            Token::Bool(true),
            Token::Comma,
            Token::Bool(false),
            Token::Comma,
            Token::Null,
            Token::RightBracket,
        ]
    );
}

#[test]
fn string_text_is_raw_bytes_between_quotes() {
    // no escape processing: the backslash is kept verbatim
    let tokens = tokenize(br#""a\nb""#).unwrap();
    assert_eq!(tokens, vec![Token::String("a\\nb".into())]);
}

#[test]
fn unscannable_byte_is_an_error_not_a_skip() {
    let err = tokenize(b"[1, #]").unwrap_err();
    assert_eq!(
        err,
        LexError::UnmatchedByte {
            position: 4,
            byte: b'#',
        }
    );
}

#[test]
fn truncated_literal_is_unmatched() {
    let err = tokenize(b"tru").unwrap_err();
    assert!(matches!(err, LexError::UnmatchedByte { position: 0, .. }));
}

#[test]
fn null_prefix_garbage_is_unmatched() {
    let err = tokenize(b"nux").unwrap_err();
    assert!(matches!(err, LexError::UnmatchedByte { position: 0, .. }));
}

#[test]
fn unterminated_string_reports_opening_quote() {
    let err = tokenize(br#"{"abc"#).unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { position: 1 });
}

#[test]
fn digit_run_past_i64_overflows() {
    let err = tokenize(b"9999999999999999999999999").unwrap_err();
    assert_eq!(err, LexError::NumberOverflow { position: 0 });
}

#[test]
fn i64_max_still_fits() {
    let tokens = tokenize(b"9223372036854775807").unwrap();
    assert_eq!(tokens, vec![Token::Number(i64::MAX)]);
}

#[test]
fn signs_are_not_part_of_the_number_rule() {
    let err = tokenize(b"-1").unwrap_err();
    assert!(matches!(
        err,
        LexError::UnmatchedByte {
            position: 0,
            byte: b'-',
        }
    ));
}
