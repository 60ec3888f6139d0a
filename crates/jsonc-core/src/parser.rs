//! Parser: converts JSON text into a [`Value`] tree.
//!
//! Single-pass recursive descent over a byte cursor. The only lookahead beyond
//! one character is inside the number scanner, which backs off from a dangling
//! `.` or exponent marker.
//!
//! # Leniency
//!
//! - An unknown escape such as `\q` yields the escaped character itself
//! - `\u` followed by anything other than four hex digits yields a literal `u`
//! - Raw control characters inside strings are accepted as-is
//! - Leading zeros in numbers (`007`) are accepted
//!
//! Everything else that is not JSON fails with [`JsonError::Syntax`] at the
//! first offending byte.

use crate::error::{JsonError, Result};
use crate::number::scan_number;
use crate::options::ParseOptions;
use crate::reviver::revive_with_limit;
use crate::serializer::Transform;
use crate::value::{Array, Object, Value};
use indexmap::IndexMap;

/// Parse JSON text into a value.
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, None, &ParseOptions::default())
}

/// Parse JSON text, then run `reviver` over the result bottom-up.
///
/// See [`revive`](crate::revive) for the order in which the reviver is called.
pub fn parse_with(
    text: &str,
    reviver: Option<Transform<'_>>,
    options: &ParseOptions,
) -> Result<Value> {
    log::trace!(
        "parse: {} bytes, max_depth={}, reviver={}",
        text.len(),
        options.max_depth,
        reviver.is_some()
    );
    let mut parser = Parser::new(text, options.max_depth);
    let value = parser.parse_document().inspect_err(|err| {
        log::debug!("parse failed: {err}");
    })?;
    match reviver {
        Some(f) => revive_with_limit(value, f, options.max_depth),
        None => Ok(value),
    }
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, max_depth: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// One value, optional trailing whitespace, then end of input.
    fn parse_document(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(self.error("unexpected extra characters"));
        }
        Ok(value)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> JsonError {
        JsonError::syntax(self.pos, message)
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') => Ok(Value::String(self.parse_string()?)),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if self.bytes[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.error(&format!("invalid literal, expected '{word}'")))
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let len = scan_number(self.bytes, self.pos).ok_or_else(|| self.error("invalid number"))?;
        let literal = &self.text[self.pos..self.pos + len];
        let n: f64 = literal.parse().map_err(|_| self.error("invalid number"))?;
        self.pos += len;
        Ok(Value::Number(n))
    }

    /// Cursor is on the opening quote. Plain runs are copied as slices; only
    /// escapes are decoded character by character.
    fn parse_string(&mut self) -> Result<String> {
        self.pos += 1;
        let mut out = String::new();
        let mut run_start = self.pos;

        loop {
            let Some(b) = self.peek() else {
                return Err(self.error("unterminated string"));
            };
            match b {
                b'"' => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                b'\\' => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    self.parse_escape(&mut out)?;
                    run_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Cursor is just past the backslash.
    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let Some(ch) = self.text[self.pos..].chars().next() else {
            return Err(self.error("unterminated string"));
        };
        self.pos += ch.len_utf8();
        match ch {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => match self.read_hex4() {
                Some(unit) => out.push(self.decode_utf16(unit)),
                None => out.push('u'),
            },
            other => out.push(other),
        }
        Ok(())
    }

    /// Consume four hex digits at the cursor, if present.
    fn read_hex4(&mut self) -> Option<u16> {
        let hex = self.bytes.get(self.pos..self.pos + 4)?;
        if !hex.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        let hex = std::str::from_utf8(hex).ok()?;
        let unit = u16::from_str_radix(hex, 16).ok()?;
        self.pos += 4;
        Some(unit)
    }

    /// Combine a high surrogate with a following `\uDC00`–`\uDFFF` escape.
    /// Unpaired surrogates become U+FFFD.
    fn decode_utf16(&mut self, unit: u16) -> char {
        if (0xD800..0xDC00).contains(&unit) && self.bytes[self.pos..].starts_with(b"\\u") {
            let save = self.pos;
            self.pos += 2;
            match self.read_hex4() {
                Some(low) if (0xDC00..0xE000).contains(&low) => {
                    let code =
                        0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    return char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                }
                _ => self.pos = save,
            }
        }
        char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(JsonError::DepthLimit {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.pos += 1;
        let mut map = IndexMap::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(Object::from_map(map)));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.error("expected string key"));
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':' after object key"));
            }
            self.pos += 1;

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or '}' in object")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(Object::from_map(map)))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.pos += 1;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(Array::from_vec(items)));
        }

        loop {
            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or ']' in array")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(Array::from_vec(items)))
    }
}
