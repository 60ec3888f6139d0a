//! Ready-made replacers for [`stringify_with`](crate::stringify_with).
//!
//! A replacer only sees `(key, value)`, not the container the key belongs to,
//! so these helpers match array indices too: `omit_keys(&["0"])` also nulls out
//! the first element of every array. Use
//! [`StringifyOptions::with_property_list`](crate::StringifyOptions::with_property_list)
//! for an allow-list that only applies to object keys.
//!
//! # Examples
//!
//! ```
//! use jsonc_core::{replacer, stringify_with, StringifyOptions, Value};
//!
//! let v = Value::object([
//!     ("user", Value::from("alice")),
//!     ("etag", Value::from("abc")),
//!     ("auth", Value::object([("password", Value::from("hunter2"))])),
//! ]);
//! let mut omit = replacer::omit_keys(&["etag"]);
//! let mut mask = replacer::mask_keys(&["password"], "***");
//! let opts = StringifyOptions::default();
//!
//! let text = stringify_with(&v, Some(&mut omit), &opts).unwrap().unwrap();
//! assert_eq!(text, r#"{"user":"alice","auth":{"password":"hunter2"}}"#);
//!
//! let text = stringify_with(&v, Some(&mut mask), &opts).unwrap().unwrap();
//! assert_eq!(text, r#"{"user":"alice","etag":"abc","auth":{"password":"***"}}"#);
//! ```

use crate::value::Value;
use std::collections::HashSet;

fn key_set(keys: &[&str]) -> HashSet<String> {
    keys.iter().map(|k| (*k).to_string()).collect()
}

/// Drop every entry whose key is in `keys`, at any depth. The root (key `""`)
/// is never dropped.
pub fn omit_keys(keys: &[&str]) -> impl FnMut(&str, Value) -> Value + 'static {
    let keys = key_set(keys);
    move |key: &str, value: Value| {
        if !key.is_empty() && keys.contains(key) {
            Value::Undefined
        } else {
            value
        }
    }
}

/// Replace the value of every entry whose key is in `keys` with `mask`, at
/// any depth. Entries that already have no representation are left alone.
pub fn mask_keys(
    keys: &[&str],
    mask: impl Into<Value>,
) -> impl FnMut(&str, Value) -> Value + 'static {
    let keys = key_set(keys);
    let mask = mask.into();
    move |key: &str, value: Value| {
        if !key.is_empty() && keys.contains(key) && !value.is_undefined() {
            mask.clone()
        } else {
            value
        }
    }
}

/// Run `first`, then `second` on its result. An `Undefined` from `first` is
/// final and skips `second`.
pub fn chain<A, B>(mut first: A, mut second: B) -> impl FnMut(&str, Value) -> Value
where
    A: FnMut(&str, Value) -> Value,
    B: FnMut(&str, Value) -> Value,
{
    move |key: &str, value: Value| {
        let value = first(key, value);
        if value.is_undefined() {
            value
        } else {
            second(key, value)
        }
    }
}
