//! Bottom-up reviver walk over a parsed value.
//!
//! The reviver sees every entry after all of that entry's own children have been
//! revived, so a parent observes its children's final values. The root is visited
//! last, under key `""`, even when it is a primitive: once as the entry of its
//! holder, then once more on that result to produce the return value.
//!
//! Keys (object) and length (array) are snapshotted before a container's entries
//! are visited; each entry's value is then read from, and written back to, the
//! live container. Returning [`Value::Undefined`] removes an object entry, or
//! leaves a hole (an `Undefined` slot) in an array, so indices stay aligned.

use crate::error::{JsonError, Result};
use crate::options::DEFAULT_MAX_DEPTH;
use crate::serializer::Transform;
use crate::value::Value;

/// Run `reviver` over `root` bottom-up and return the reviver's final result
/// for the root. The reviver sees key `""` twice.
///
/// # Example
/// ```
/// use jsonc_core::{parse, revive, Value};
///
/// let v = parse(r#"{"name":"Alice","age":25}"#).unwrap();
/// let mut drop_age = |key: &str, value: Value| {
///     if key == "age" { Value::Undefined } else { value }
/// };
/// let v = revive(v, &mut drop_age).unwrap();
/// assert_eq!(v.to_string(), r#"{"name":"Alice"}"#);
/// ```
pub fn revive(root: Value, reviver: Transform<'_>) -> Result<Value> {
    revive_with_limit(root, reviver, DEFAULT_MAX_DEPTH)
}

pub(crate) fn revive_with_limit(
    root: Value,
    reviver: Transform<'_>,
    max_depth: usize,
) -> Result<Value> {
    // The root sits in a holder under key "": its entry is revived like any
    // other, then the reviver gets one last call on the result.
    internalize(&root, reviver, 0, max_depth)?;
    let root = reviver("", root);
    Ok(reviver("", root))
}

/// Revive the entries of `value`, if it is a container. The caller applies
/// the reviver to `value` itself.
fn internalize(
    value: &Value,
    reviver: &mut dyn FnMut(&str, Value) -> Value,
    depth: usize,
    max_depth: usize,
) -> Result<()> {
    if !value.is_container() {
        return Ok(());
    }
    if depth >= max_depth {
        log::debug!("revive: nesting deeper than {max_depth}");
        return Err(JsonError::DepthLimit { limit: max_depth });
    }

    match value {
        Value::Array(arr) => {
            let len = arr.len();
            for i in 0..len {
                let child = arr.get(i).unwrap_or(Value::Undefined);
                internalize(&child, reviver, depth + 1, max_depth)?;
                let revived = reviver(&i.to_string(), child);
                if revived.is_undefined() && i >= arr.len() {
                    // Already gone; nothing to leave a hole in.
                    continue;
                }
                arr.set(i, revived);
            }
        }
        Value::Object(obj) => {
            for key in obj.keys() {
                let child = obj.get(&key).unwrap_or(Value::Undefined);
                internalize(&child, reviver, depth + 1, max_depth)?;
                let revived = reviver(&key, child);
                if revived.is_undefined() {
                    obj.remove(&key);
                } else {
                    obj.insert(key, revived);
                }
            }
        }
        _ => {}
    }
    Ok(())
}
