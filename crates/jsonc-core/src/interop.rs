//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! Converting to serde follows the serializer's rules: cycles fail, entries with
//! no representation are dropped from objects and become `null` in arrays, and
//! non-finite numbers become `null`. Integral numbers within the exactly
//! representable range come out as integer `Number`s so they compare equal to
//! what `serde_json` itself parses.

use crate::error::Result;
use crate::options::DEFAULT_MAX_DEPTH;
use crate::stack::{VisitGuard, VisitStack, Visitor};
use crate::value::{Array, Object, Value};
use serde_json::{Map, Number};

/// Largest integer magnitude an `f64` represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

impl Value {
    /// Convert to a `serde_json::Value`. Returns `Ok(None)` when the value has
    /// no JSON representation.
    pub fn to_serde(&self) -> Result<Option<serde_json::Value>> {
        let mut conv = Converter {
            stack: VisitStack::new(DEFAULT_MAX_DEPTH),
        };
        conv.convert(self)
    }
}

struct Converter {
    stack: VisitStack,
}

impl Visitor for Converter {
    fn visit_stack(&mut self) -> &mut VisitStack {
        &mut self.stack
    }
}

impl Converter {
    fn convert(&mut self, value: &Value) -> Result<Option<serde_json::Value>> {
        Ok(Some(match value {
            Value::Undefined | Value::Function(_) => return Ok(None),
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_serde(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(arr) => self.convert_array(arr)?,
            Value::Object(obj) => self.convert_object(obj)?,
        }))
    }

    fn convert_array(&mut self, arr: &Array) -> Result<serde_json::Value> {
        let mut this = VisitGuard::enter(self, arr.id())?;
        let mut out = Vec::with_capacity(arr.len());
        for item in arr.to_vec() {
            out.push(this.convert(&item)?.unwrap_or(serde_json::Value::Null));
        }
        Ok(serde_json::Value::Array(out))
    }

    fn convert_object(&mut self, obj: &Object) -> Result<serde_json::Value> {
        let mut this = VisitGuard::enter(self, obj.id())?;
        let mut out = Map::new();
        for (key, child) in obj.entries() {
            if let Some(converted) = this.convert(&child)? {
                out.insert(key, converted);
            }
        }
        Ok(serde_json::Value::Object(out))
    }
}

fn number_to_serde(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        // -0.0 lands here too and becomes 0
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_serde_preserves_order() {
        let v = Value::from(json!({"z": 1, "a": [true, null, "s"]}));
        assert_eq!(v.as_object().map(Object::keys), Some(vec!["z".to_string(), "a".to_string()]));
        assert_eq!(v.to_string(), r#"{"z":1,"a":[true,null,"s"]}"#);
    }

    #[test]
    fn to_serde_integers_and_floats() {
        let v = Value::array([Value::from(3), Value::from(2.5), Value::from(-0.0)]);
        assert_eq!(v.to_serde().unwrap(), Some(json!([3, 2.5, 0])));
    }

    #[test]
    fn to_serde_non_finite_is_null() {
        let v = Value::array([Value::from(f64::NAN), Value::from(f64::INFINITY)]);
        assert_eq!(v.to_serde().unwrap(), Some(json!([null, null])));
    }

    #[test]
    fn to_serde_drops_unrepresentable() {
        let f = Value::function("f", |_| Value::Null);
        let v = Value::object([
            ("a", Value::Undefined),
            ("b", Value::array([f.clone(), Value::Undefined])),
            ("c", f),
        ]);
        assert_eq!(v.to_serde().unwrap(), Some(json!({"b": [null, null]})));
        assert_eq!(Value::Undefined.to_serde().unwrap(), None);
    }

    #[test]
    fn to_serde_detects_cycles() {
        let arr = Array::new();
        arr.push(Value::Array(arr.clone()));
        assert!(Value::Array(arr).to_serde().is_err());
    }

    #[test]
    fn large_integers_stay_floats() {
        let v = Value::from(1e300);
        assert_eq!(v.to_serde().unwrap(), Some(json!(1e300)));
    }
}
