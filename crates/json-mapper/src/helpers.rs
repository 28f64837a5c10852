//! Expression fragments wrapping a path lookup with a secondary transform.
//!
//! Both helpers produce plain `{_transform}` mappings, so they compose with
//! any other expression.

use crate::resolve::{is_absent, lookup};
use crate::types::{Expr, Mapping};
use serde_json::{Number, Value};

/// Resolves `path` and coerces the result to an integer.
///
/// When coercion fails the fragment yields `default`, or `null` when no
/// default was given.
///
/// ```
/// use json_mapper::{as_int, evaluate, Expr, Mapping};
/// use serde_json::json;
///
/// let expr: Expr = Mapping::new().field("age", as_int("age", Some((-1).into()))).into();
///
/// assert_eq!(evaluate(&expr, &json!({"age": "42"})).unwrap(), json!({"age": 42}));
/// assert_eq!(evaluate(&expr, &json!({"age": "n/a"})).unwrap(), json!({"age": -1}));
/// ```
pub fn as_int(path: impl Into<String>, default: Option<Number>) -> Expr {
    let path = path.into();
    Mapping::new()
        .transform(move |data| {
            let value = lookup(&path, data).unwrap_or(Value::Null);
            to_int(&value)
                .or_else(|| default.clone().map(Value::Number))
                .unwrap_or(Value::Null)
        })
        .into()
}

/// Resolves `path`, substituting `default` when the value is missing or
/// `null`. Other falsy values such as `0` and `false` are kept.
pub fn coalesce(path: impl Into<String>, default: impl Into<Value>) -> Expr {
    let path = path.into();
    let default = default.into();
    Mapping::new()
        .transform(move |data| {
            let value = lookup(&path, data);
            if is_absent(value.as_ref()) {
                default.clone()
            } else {
                value.unwrap_or(Value::Null)
            }
        })
        .into()
}

/// Coerces a value to an integer the way a dynamic `parseInt` does on its
/// string form. Returns `None` when no integer can be read.
pub fn to_int(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
        Value::Number(n) => number_to_int(n),
        other => parse_int(&to_js_string(other)),
    }
}

/// Truncates a number. Floats that a dynamic language prints in exponent
/// form (below 1e-6 or from 1e21 up) go through the string route instead.
fn number_to_int(n: &Number) -> Option<Value> {
    if n.is_i64() || n.is_u64() {
        return Some(Value::Number(n.clone()));
    }
    let f = n.as_f64()?;
    let magnitude = f.abs();
    if !(1e-6..1e21).contains(&magnitude) && magnitude != 0.0 {
        return parse_int(&n.to_string());
    }
    let t = f.trunc();
    if t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(Value::from(t as i64))
    } else {
        Number::from_f64(t).map(Value::Number)
    }
}

/// Renders a value the way a dynamic language stringifies it: arrays join
/// their elements with commas and `null` elements render empty.
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Reads the leading integer of `s`: optional whitespace, an optional sign,
/// an optional `0x` prefix, then the longest run of digits.
pub fn parse_int(s: &str) -> Option<Value> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, rest) = if rest.starts_with("0x") || rest.starts_with("0X") {
        (16, &rest[2..])
    } else {
        (10, rest)
    };
    let end = rest
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    match i64::from_str_radix(digits, radix) {
        Ok(n) => Some(Value::from(if negative { -n } else { n })),
        Err(_) => {
            // Too large for i64.
            let n = if radix == 10 {
                digits.parse::<f64>().ok()?
            } else {
                digits.chars().fold(0.0_f64, |acc, c| {
                    acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
                })
            };
            Number::from_f64(if negative { -n } else { n }).map(Value::Number)
        }
    }
}
