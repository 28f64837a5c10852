//! The recursive evaluator.

use crate::config::MapperConfig;
use crate::error::MapError;
use crate::resolve::{is_falsy, json_type};
use crate::types::{Expr, Mapping, Selector, Transform};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Evaluates `expr` against `data` with the default path resolver.
///
/// ```
/// use json_mapper::{evaluate, Expr, Mapping};
/// use serde_json::json;
///
/// let expr: Expr = Mapping::new().field("fullName", "name").into();
/// let result = evaluate(&expr, &json!({"name": "John", "age": 20})).unwrap();
///
/// assert_eq!(result, json!({"fullName": "John"}));
/// ```
pub fn evaluate(expr: &Expr, data: &Value) -> Result<Value, MapError> {
    evaluate_with(expr, data, &MapperConfig::default())
}

/// Evaluates `expr` against `data` with the given configuration.
///
/// - Falsy data yields `null`, whatever the expression.
/// - An empty expression returns the data unchanged.
/// - Array data is broadcast: the expression is applied to each element.
/// - A path is handed to the configured resolver.
/// - A mapping is re-scoped by its selector, then either transformed or
///   mapped field by field.
/// - Any other expression yields `null`.
pub fn evaluate_with(expr: &Expr, data: &Value, config: &MapperConfig) -> Result<Value, MapError> {
    Evaluator { config }.eval(expr, data)
}

struct Evaluator<'a> {
    config: &'a MapperConfig,
}

impl Evaluator<'_> {
    fn eval(&self, expr: &Expr, data: &Value) -> Result<Value, MapError> {
        if is_falsy(data) {
            return Ok(Value::Null);
        }
        if expr.is_empty() {
            return Ok(data.clone());
        }
        if let Value::Array(items) = data {
            tracing::trace!(len = items.len(), "broadcasting expression over array");
            return items
                .iter()
                .map(|item| self.eval(expr, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }
        match expr {
            Expr::Mapping(mapping) => self.eval_mapping(mapping, data),
            Expr::Path(path) => Ok(self.config.resolve(path, data)),
            Expr::Empty | Expr::Unsupported(_) => Ok(Value::Null),
        }
    }

    fn eval_mapping(&self, mapping: &Mapping, data: &Value) -> Result<Value, MapError> {
        let scoped = match &mapping.selector {
            Some(selector) => Cow::Owned(self.select(selector, data)?),
            None => Cow::Borrowed(data),
        };
        self.eval_scoped(mapping, &scoped)
    }

    /// Evaluates a mapping whose selector has already been applied.
    fn eval_scoped(&self, mapping: &Mapping, data: &Value) -> Result<Value, MapError> {
        if let Value::Array(items) = data {
            tracing::trace!(len = items.len(), "broadcasting selected array");
            return items
                .iter()
                .map(|item| {
                    if is_falsy(item) {
                        Ok(Value::Null)
                    } else {
                        self.eval_scoped(mapping, item)
                    }
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }

        if let Some(transform) = &mapping.transform {
            return match transform {
                Transform::Function(f) => Ok(f(data)),
                Transform::Invalid(v) => {
                    tracing::debug!(found = json_type(v), "invalid transform");
                    Err(MapError::InvalidTransform(json_type(v)))
                }
            };
        }

        let mut out = Map::with_capacity(mapping.fields.len());
        for (name, sub) in &mapping.fields {
            out.insert(name.clone(), self.eval(sub, data)?);
        }
        Ok(Value::Object(out))
    }

    fn select(&self, selector: &Selector, data: &Value) -> Result<Value, MapError> {
        match selector {
            Selector::Function(f) => Ok(f(data)),
            Selector::Path(path) => {
                tracing::trace!(path = %path, "re-scoping data");
                Ok(self.config.resolve(path, data))
            }
            Selector::Invalid(v) => {
                tracing::debug!(found = json_type(v), "invalid selector");
                Err(MapError::InvalidSelector(json_type(v)))
            }
        }
    }
}
