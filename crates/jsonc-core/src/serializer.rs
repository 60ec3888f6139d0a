//! Serializer: converts a [`Value`] tree into JSON text.
//!
//! The walk is depth-first. Every value, the root included (under key `""`),
//! passes through the optional replacer before dispatch, so a replacer can
//! substitute, mask, or drop entries:
//!
//! - **Arrays never shrink**: an element with no representation is written as `null`
//! - **Objects may shrink**: an entry with no representation is omitted
//! - **Root**: a root with no representation yields `Ok(None)` instead of text
//!
//! Containers are tracked on an identity stack while their children are written;
//! reaching a container that is already on the stack fails the whole call with
//! [`JsonError::CyclicReference`].
//!
//! # Example
//! ```
//! use jsonc_core::{stringify_with, Indent, StringifyOptions, Value};
//!
//! let v = Value::object([("name", Value::from("Alice")), ("age", Value::from(25))]);
//! let opts = StringifyOptions::pretty(Indent::Spaces(2));
//! let text = stringify_with(&v, None, &opts).unwrap().unwrap();
//! assert_eq!(text, "{\n  \"name\": \"Alice\",\n  \"age\": 25\n}");
//! ```

use crate::error::Result;
use crate::number::format_number;
use crate::options::StringifyOptions;
use crate::stack::{VisitGuard, VisitStack, Visitor};
use crate::value::{Array, Object, Value};

/// Callback applied to `(key, value)` pairs during a walk. Returning
/// [`Value::Undefined`] drops the entry.
pub type Transform<'a> = &'a mut dyn FnMut(&str, Value) -> Value;

/// Serialize `value` as compact JSON.
///
/// Returns `Ok(None)` when the root itself has no JSON representation
/// (`Undefined` or a function).
pub fn stringify(value: &Value) -> Result<Option<String>> {
    stringify_with(value, None, &StringifyOptions::default())
}

/// Serialize `value` with an optional replacer and the given options.
pub fn stringify_with(
    value: &Value,
    replacer: Option<Transform<'_>>,
    options: &StringifyOptions,
) -> Result<Option<String>> {
    log::trace!(
        "stringify: kind={} indent={:?} replacer={}",
        value.kind(),
        options.indent,
        replacer.is_some()
    );
    let mut ser = Serializer {
        replacer,
        unit: options.indent.unit(),
        property_list: options.property_list.as_deref(),
        stack: VisitStack::new(options.max_depth),
        out: String::new(),
    };

    let root = ser.transform("", value.clone());
    if !has_representation(&root) {
        return Ok(None);
    }
    match ser.write_value(&root) {
        Ok(()) => Ok(Some(ser.out)),
        Err(err) => {
            log::debug!("stringify failed: {err}");
            Err(err)
        }
    }
}

/// Whether a value produces text. `Undefined` and functions do not.
fn has_representation(value: &Value) -> bool {
    !matches!(value, Value::Undefined | Value::Function(_))
}

struct Serializer<'r, 'o> {
    replacer: Option<Transform<'r>>,
    /// One level of indentation, `None` in compact mode.
    unit: Option<String>,
    property_list: Option<&'o [String]>,
    stack: VisitStack,
    out: String,
}

impl Visitor for Serializer<'_, '_> {
    fn visit_stack(&mut self) -> &mut VisitStack {
        &mut self.stack
    }
}

impl Serializer<'_, '_> {
    fn transform(&mut self, key: &str, value: Value) -> Value {
        match self.replacer.as_deref_mut() {
            Some(f) => f(key, value),
            None => value,
        }
    }

    /// Write an already-transformed value that has a representation.
    fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.out.push_str(&format_number(*n)),
            Value::String(s) => write_quoted(s, &mut self.out),
            Value::Array(arr) => self.write_array(arr)?,
            Value::Object(obj) => self.write_object(obj)?,
            // Filtered out by callers
            Value::Undefined | Value::Function(_) => {}
        }
        Ok(())
    }

    /// Elements are read one at a time so a replacer may mutate the array
    /// while it is being written. The length is fixed on entry.
    fn write_array(&mut self, arr: &Array) -> Result<()> {
        let mut this = VisitGuard::enter(self, arr.id())?;
        let len = arr.len();
        if len == 0 {
            this.out.push_str("[]");
            return Ok(());
        }

        this.out.push('[');
        for i in 0..len {
            if i > 0 {
                this.out.push(',');
            }
            this.newline_indent(0);
            let item = arr.get(i).unwrap_or(Value::Undefined);
            let item = this.transform(&i.to_string(), item);
            if has_representation(&item) {
                this.write_value(&item)?;
            } else {
                this.out.push_str("null");
            }
        }
        this.newline_indent(-1);
        this.out.push(']');
        Ok(())
    }

    /// Keys are snapshotted on entry; each value is read when its turn comes,
    /// so a key removed by the replacer in the meantime is skipped.
    fn write_object(&mut self, obj: &Object) -> Result<()> {
        let mut this = VisitGuard::enter(self, obj.id())?;
        let keys = match this.property_list {
            Some(list) => list.to_vec(),
            None => obj.keys(),
        };

        this.out.push('{');
        let mut wrote_any = false;
        for key in keys {
            let Some(child) = obj.get(&key) else {
                continue;
            };
            let child = this.transform(&key, child);
            if !has_representation(&child) {
                continue;
            }
            if wrote_any {
                this.out.push(',');
            }
            wrote_any = true;
            this.newline_indent(0);
            write_quoted(&key, &mut this.out);
            this.out.push(':');
            if this.unit.is_some() {
                this.out.push(' ');
            }
            this.write_value(&child)?;
        }
        if wrote_any {
            this.newline_indent(-1);
        }
        this.out.push('}');
        Ok(())
    }

    /// In indent mode, start a new line indented to the current stack depth
    /// plus `offset` levels.
    fn newline_indent(&mut self, offset: isize) {
        if let Some(unit) = &self.unit {
            let depth = self.stack.depth().saturating_add_signed(offset);
            self.out.push('\n');
            for _ in 0..depth {
                self.out.push_str(unit);
            }
        }
    }
}

/// Write `s` as a quoted JSON string. Only `"`, `\`, and the five
/// single-letter control escapes are rewritten.
fn write_quoted(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
