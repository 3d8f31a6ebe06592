//! Canonical serialization: the text form [`crate::parse`] reads back.
//!
//! - Object members keep insertion order.
//! - Floats always carry a decimal point (`4.0`, never `4`), so the
//!   integer/float distinction survives a round trip. Non-finite floats
//!   have no textual form and are written as `null`.
//! - Strings are written between quotes verbatim. The format has no escape
//!   sequences, so a string containing `"` does not round-trip.
//!
//! # Example
//! ```
//! use docql_core::{encoder, parse};
//!
//! let value = parse(r#"{ "a": 1, "b": [2.5, true, null] }"#).unwrap();
//! assert_eq!(encoder::to_string(&value), r#"{"a":1,"b":[2.5,true,null]}"#);
//! ```

use crate::value::{Map, Number, Value};
use std::fmt;

/// Compact single-line serialization.
pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    encode_value(value, None, 0, &mut out);
    out
}

/// Multi-line serialization with two-space indentation.
pub fn to_string_pretty(value: &Value) -> String {
    let mut out = String::new();
    encode_value(value, Some("  "), 0, &mut out);
    out
}

/// Dispatch on kind. `indent` is `None` for compact output.
fn encode_value(value: &Value, indent: Option<&str>, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => encode_number(*n, out),
        Value::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Value::Array(items) => encode_array(items, indent, depth, out),
        Value::Object(map) => encode_object(map, indent, depth, out),
    }
}

fn encode_number(n: Number, out: &mut String) {
    match n {
        Number::Float(f) if !f.is_finite() => out.push_str("null"),
        n => out.push_str(&n.to_string()),
    }
}

fn encode_array(items: &[Value], indent: Option<&str>, depth: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline(indent, depth + 1, out);
        encode_value(item, indent, depth + 1, out);
    }
    newline(indent, depth, out);
    out.push(']');
}

fn encode_object(map: &Map, indent: Option<&str>, depth: usize, out: &mut String) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline(indent, depth + 1, out);
        out.push('"');
        out.push_str(key);
        out.push_str(if indent.is_some() { "\": " } else { "\":" });
        encode_value(value, indent, depth + 1, out);
    }
    newline(indent, depth, out);
    out.push('}');
}

/// Line break plus indentation for `depth`; a no-op in compact mode.
fn newline(indent: Option<&str>, depth: usize, out: &mut String) {
    if let Some(unit) = indent {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(unit);
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_string(self))
    }
}
