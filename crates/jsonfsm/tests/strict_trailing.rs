use jsonfsm::{Options, ParseError, decode_from_str};
use serde_json::json;

const STRICT: Options = Options { strict: true };

#[test]
fn trailing_document_is_ignored_by_default() {
    let v = decode_from_str("{} {}", &Options::default()).unwrap();
    assert_eq!(serde_json::Value::from(v), json!({}));
}

#[test]
fn trailing_document_is_an_error_in_strict_mode() {
    let err = decode_from_str("{} {}", &STRICT).unwrap_err();
    assert!(matches!(
        err,
        jsonfsm::Error::Parse(ParseError::TrailingTokens { position: 2 })
    ));
}

#[test]
fn stray_closer_after_root_is_ignored_by_default() {
    let v = decode_from_str("[1]]", &Options::default()).unwrap();
    assert_eq!(serde_json::Value::from(v), json!([1]));
}

#[test]
fn stray_closer_after_root_is_an_error_in_strict_mode() {
    let err = decode_from_str("[1]]", &STRICT).unwrap_err();
    assert!(matches!(
        err,
        jsonfsm::Error::Parse(ParseError::TrailingTokens { position: 3 })
    ));
}

#[test]
fn strict_mode_accepts_a_single_document() {
    let v = decode_from_str(r#"{"a":[1,2]}"#, &STRICT).unwrap();
    assert_eq!(serde_json::Value::from(v), json!({"a": [1, 2]}));
}

#[test]
fn trailing_whitespace_is_fine_in_strict_mode() {
    let v = decode_from_str("[1] \n\t ", &STRICT).unwrap();
    assert_eq!(serde_json::Value::from(v), json!([1]));
}
