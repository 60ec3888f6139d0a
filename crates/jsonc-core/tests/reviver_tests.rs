//! Reviver tests: call order, deletion, substitution, holes in arrays, and the
//! final root call.

use jsonc_core::{parse, parse_with, revive, stringify, ParseOptions, Value};

fn parse_revived(text: &str, reviver: &mut dyn FnMut(&str, Value) -> Value) -> Value {
    parse_with(text, Some(reviver), &ParseOptions::default()).unwrap()
}

fn compact(v: &Value) -> String {
    stringify(v).unwrap().unwrap_or_else(|| "undefined".to_string())
}

#[test]
fn reviver_deletes_object_field() {
    let mut drop_age = |key: &str, value: Value| {
        if key == "age" {
            Value::Undefined
        } else {
            value
        }
    };
    let v = parse_revived(r#"{"name":"Alice","age":25}"#, &mut drop_age);
    let obj = v.as_object().unwrap();
    assert_eq!(obj.keys(), vec!["name"]);
    assert_eq!(obj.get("name"), Some(Value::from("Alice")));
}

#[test]
fn reviver_call_order_is_bottom_up() {
    let mut seen = Vec::new();
    let mut record = |key: &str, value: Value| {
        seen.push(key.to_string());
        value
    };
    parse_revived(r#"{"a":[1,{"b":2}],"c":3}"#, &mut record);
    assert_eq!(seen, vec!["0", "b", "1", "a", "c", "", ""]);
}

#[test]
fn reviver_root_calls_run_for_primitive_root() {
    let mut calls = Vec::new();
    let mut record = |key: &str, value: Value| {
        calls.push((key.to_string(), value.clone()));
        value
    };
    parse_revived("42", &mut record);
    assert_eq!(
        calls,
        vec![(String::new(), Value::from(42)), (String::new(), Value::from(42))]
    );
}

#[test]
fn reviver_can_replace_root() {
    let mut wrap = |key: &str, value: Value| {
        if key.is_empty() {
            Value::object([("wrapped", value)])
        } else {
            value
        }
    };
    // Once as the holder entry, once for the final result.
    let v = parse_revived("[1]", &mut wrap);
    assert_eq!(compact(&v), r#"{"wrapped":{"wrapped":[1]}}"#);
}

#[test]
fn reviver_root_step_sees_its_own_result() {
    let mut bump_root = |key: &str, value: Value| match value {
        Value::Number(n) if key.is_empty() => Value::Number(n + 1.0),
        other => other,
    };
    let v = parse_revived("5", &mut bump_root);
    assert_eq!(v, Value::from(7));
}

#[test]
fn reviver_can_return_undefined_root() {
    let mut drop_all = |_: &str, _: Value| Value::Undefined;
    let v = parse_revived(r#"{"a":1}"#, &mut drop_all);
    assert!(v.is_undefined());
}

#[test]
fn reviver_substitutes_values() {
    let mut double = |_: &str, value: Value| match value {
        Value::Number(n) => Value::Number(n * 2.0),
        other => other,
    };
    let v = parse_revived(r#"{"x":1,"y":[2,3]}"#, &mut double);
    assert_eq!(compact(&v), r#"{"x":2,"y":[4,6]}"#);
}

#[test]
fn reviver_parent_sees_revived_children() {
    let mut sum = |_: &str, value: Value| {
        if let Value::Array(arr) = &value {
            let total: f64 = arr.to_vec().iter().filter_map(Value::as_f64).sum();
            return Value::from(total);
        }
        match value {
            Value::Number(n) => Value::Number(n + 1.0),
            other => other,
        }
    };
    // Elements become 2,3,4 before the array is summed to 9; the final root
    // call then sees the number and adds one.
    let v = parse_revived("[1,2,3]", &mut sum);
    assert_eq!(v, Value::from(10));
}

#[test]
fn reviver_undefined_leaves_hole_in_array() {
    let mut drop_middle = |key: &str, value: Value| {
        if key == "1" {
            Value::Undefined
        } else {
            value
        }
    };
    let v = parse_revived(r#"["a","b","c"]"#, &mut drop_middle);
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert!(arr.get(1).unwrap().is_undefined());
    assert_eq!(compact(&v), r#"["a",null,"c"]"#);
}

#[test]
fn reviver_deletion_in_nested_object() {
    let mut drop_secret = |key: &str, value: Value| {
        if key == "secret" {
            Value::Undefined
        } else {
            value
        }
    };
    let v = parse_revived(
        r#"{"user":{"name":"A","secret":"x"},"list":[{"secret":1,"k":2}]}"#,
        &mut drop_secret,
    );
    assert_eq!(compact(&v), r#"{"user":{"name":"A"},"list":[{"k":2}]}"#);
}

#[test]
fn reviver_keeps_key_order_on_overwrite() {
    let mut upper = |_: &str, value: Value| match value {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    };
    let v = parse_revived(r#"{"b":"x","a":"y"}"#, &mut upper);
    assert_eq!(compact(&v), r#"{"b":"X","a":"Y"}"#);
}

#[test]
fn reviver_deleting_a_sibling_is_seen_as_undefined() {
    // Removing "b" while visiting "a": the snapshot still visits "b",
    // but reads it as undefined from the live object.
    let mut seen = Vec::new();
    let mut reviver = |key: &str, value: Value| {
        seen.push((key.to_string(), value.kind()));
        value
    };
    let root = parse(r#"{"a":{"x":1},"b":2}"#).unwrap();
    let handle = root.as_object().unwrap().clone();
    let mut delete_b = |key: &str, value: Value| {
        if key == "x" {
            handle.remove("b");
        }
        reviver(key, value)
    };
    let out = revive(root, &mut delete_b).unwrap();
    assert_eq!(compact(&out), r#"{"a":{"x":1}}"#);
    assert_eq!(
        seen,
        vec![
            ("x".to_string(), "number"),
            ("a".to_string(), "object"),
            ("b".to_string(), "undefined"),
            (String::new(), "object"),
            (String::new(), "object"),
        ]
    );
}

#[test]
fn parse_without_reviver_is_unchanged() {
    let text = r#"{"a":[1,2,{"b":null}]}"#;
    let plain = parse(text).unwrap();
    let mut identity = |_: &str, value: Value| value;
    let revived = parse_revived(text, &mut identity);
    assert_eq!(plain, revived);
}

#[test]
fn revive_works_on_constructed_values() {
    let v = Value::array([Value::from(1), Value::from("x")]);
    let mut stringify_numbers = |_: &str, value: Value| match value {
        Value::Number(n) => Value::from(n.to_string()),
        other => other,
    };
    let out = revive(v, &mut stringify_numbers).unwrap();
    assert_eq!(compact(&out), r#"["1","x"]"#);
}
