use jsonfsm::{Options, decode_from_str};
use serde_json::json;

fn decode(s: &str) -> serde_json::Value {
    decode_from_str(s, &Options::default()).unwrap().into()
}

#[test]
fn empty_object() {
    assert_eq!(decode("{}"), json!({}));
}

#[test]
fn empty_array() {
    assert_eq!(decode("[]"), json!([]));
}

#[test]
fn object_with_string_member() {
    assert_eq!(decode(r#"{"a":"12"}"#), json!({"a": "12"}));
}

#[test]
fn array_inside_object() {
    assert_eq!(decode(r#"{"abc":["10"]}"#), json!({"abc": ["10"]}));
}

#[test]
fn two_number_members() {
    // exactly these members; key order is not asserted
    assert_eq!(decode(r#"{"a":12,"b":25}"#), json!({"a": 12, "b": 25}));
}

#[test]
fn scalars_of_every_kind() {
    assert_eq!(
        decode(r#"{"s":"x","n":7,"t":true,"f":false,"z":null}"#),
        json!({"s": "x", "n": 7, "t": true, "f": false, "z": null})
    );
}

#[test]
fn array_root_with_mixed_members() {
    assert_eq!(
        decode(r#"[1,[2,[]],{"k":null}]"#),
        json!([1, [2, []], {"k": null}])
    );
}

#[test]
fn nested_empty_containers() {
    assert_eq!(decode(r#"{"a":{},"b":[[]]}"#), json!({"a": {}, "b": [[]]}));
}

#[test]
fn whitespace_between_every_symbol() {
    let doc = "{\n\t\"abs\": {\n\t\t\"yy\": [\n\t\t\t{\"aa\": \"123\"},\r\n\t\t\t\"123\",\n\t\t\t123\n\t\t]\n\t}\n}";
    assert_eq!(
        decode(doc),
        json!({"abs": {"yy": [{"aa": "123"}, "123", 123]}})
    );
}

#[test]
fn deep_nesting_without_recursion() {
    // container stacks, not the call stack, carry the depth
    let mut doc = String::new();
    let depth = 10_000;
    for _ in 0..depth {
        doc.push('[');
    }
    for _ in 0..depth {
        doc.push(']');
    }
    let v = decode_from_str(&doc, &Options::default()).unwrap();
    let mut cursor = &v;
    let mut seen = 0;
    while let Ok(items) = cursor.as_array() {
        seen += 1;
        match items.first() {
            Some(inner) => cursor = inner,
            None => break,
        }
    }
    assert_eq!(seen, depth);
}
