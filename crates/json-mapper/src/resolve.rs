//! Default dot-path resolver and truthiness predicates.

use serde_json::Value;
use std::borrow::Cow;

/// Returns `true` for values the evaluator treats as "no data":
/// `null`, `false`, numeric zero and the empty string.
///
/// Arrays and objects are never falsy, even when empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Returns `true` only for a missing value or an explicit `null`.
///
/// Unlike [`is_falsy`], `0`, `false` and `""` are present values.
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Returns the JSON type name of a value.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse().ok()
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<Cow<'a, Value>> {
    match value {
        Value::Object(map) => map.get(segment).map(Cow::Borrowed),
        Value::Array(items) => {
            if segment == "length" {
                return Some(Cow::Owned(Value::from(items.len())));
            }
            parse_index(segment)
                .and_then(|i| items.get(i))
                .map(Cow::Borrowed)
        }
        // Strings count and index UTF-16 code units.
        Value::String(s) => {
            if segment == "length" {
                return Some(Cow::Owned(Value::from(s.encode_utf16().count())));
            }
            let unit = s.encode_utf16().nth(parse_index(segment)?)?;
            String::from_utf16(&[unit])
                .ok()
                .map(|c| Cow::Owned(Value::String(c)))
        }
        _ => None,
    }
}

/// Walks `data` along the dot-separated `path`.
///
/// Object segments are keys; array and string segments are canonical
/// decimal indices or `length`. Returns `None` when any segment is missing.
/// Falsy leaves are returned as they are.
pub fn lookup(path: &str, data: &Value) -> Option<Value> {
    let mut current = Cow::Borrowed(data);
    for segment in path.split('.') {
        current = match current {
            Cow::Borrowed(v) => step(v, segment)?,
            Cow::Owned(v) => Cow::Owned(step(&v, segment)?.into_owned()),
        };
    }
    Some(current.into_owned())
}

/// The default path resolver.
///
/// Like [`lookup`], but falsy data, missing segments and falsy results all
/// degrade to `null`. Never fails.
pub fn pluck(path: &str, data: &Value) -> Value {
    if is_falsy(data) {
        return Value::Null;
    }
    lookup(path, data)
        .filter(|v| !is_falsy(v))
        .unwrap_or(Value::Null)
}
