//! # jsonc-core
//!
//! A self-contained JSON codec over a dynamic [`Value`] model.
//!
//! - [`stringify`] / [`stringify_with`] walk a value tree and produce JSON text,
//!   with an optional replacer, indentation, and cycle detection
//! - [`parse`] / [`parse_with`] read JSON text into a value tree, with an
//!   optional bottom-up reviver
//!
//! ## Quick start
//!
//! ```rust
//! use jsonc_core::{parse, stringify, Value};
//!
//! let v = parse(r#"{"name":"Alice","scores":[95,87.5]}"#).unwrap();
//! assert_eq!(v.as_object().unwrap().get("name"), Some(Value::from("Alice")));
//!
//! let text = stringify(&v).unwrap();
//! assert_eq!(text.as_deref(), Some(r#"{"name":"Alice","scores":[95,87.5]}"#));
//! ```
//!
//! ## No representation
//!
//! [`Value::Undefined`] and [`Value::Function`] have no JSON form. Replacers and
//! revivers return `Undefined` to drop an entry: objects omit it, arrays write
//! `null` in its place, and a root without a representation makes `stringify`
//! return `Ok(None)`.
//!
//! ## Modules
//!
//! - [`value`] — `Value`, `Array`, `Object`, `Function`
//! - [`serializer`] — value → text
//! - [`parser`] — text → value
//! - [`reviver`] — bottom-up reviver walk
//! - [`replacer`] — ready-made replacers (omit, mask, chain)
//! - [`options`] — `Indent`, `StringifyOptions`, `ParseOptions`
//! - [`number`] — number formatting and literal scanning
//! - [`interop`] — conversions to and from `serde_json::Value`
//! - [`error`] — `JsonError`

pub mod error;
pub mod interop;
pub mod number;
pub mod options;
pub mod parser;
pub mod replacer;
pub mod reviver;
pub mod serializer;
mod stack;
pub mod value;

pub use error::{JsonError, Result};
pub use options::{Indent, ParseOptions, StringifyOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse, parse_with};
pub use reviver::revive;
pub use serializer::{stringify, stringify_with, Transform};
pub use value::{Array, Function, Object, Value};
