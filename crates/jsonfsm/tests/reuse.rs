//! One parser instance across many documents: no state may leak between
//! calls.

use jsonfsm::{Parser, tokenize};
use serde_json::json;

fn json_of(v: jsonfsm::Value) -> serde_json::Value {
    v.into()
}

#[test]
fn sequential_parses_are_independent() {
    let mut parser = Parser::new();

    let first = parser.parse(tokenize(br#"{"a":1}"#).unwrap()).unwrap();
    let second = parser.parse(tokenize(br#"[2,3]"#).unwrap()).unwrap();

    assert_eq!(json_of(first), json!({"a": 1}));
    assert_eq!(json_of(second), json!([2, 3]));
}

#[test]
fn a_failed_parse_does_not_poison_the_next() {
    let mut parser = Parser::new();

    assert!(parser.parse(tokenize(br#"{"a":"#).unwrap()).is_err());

    let ok = parser.parse(tokenize(br#"{"b":true}"#).unwrap()).unwrap();
    assert_eq!(json_of(ok), json!({"b": true}));
}

#[test]
fn pending_keys_do_not_carry_over() {
    let mut parser = Parser::new();

    // dies with a key left on the pending stack
    assert!(parser.parse(tokenize(br#"{"orphan":"#).unwrap()).is_err());

    let ok = parser.parse(tokenize(br#"{"k":[1]}"#).unwrap()).unwrap();
    assert_eq!(json_of(ok), json!({"k": [1]}));
}
