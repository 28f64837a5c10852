//! Building expressions from JSON shapes.
//!
//! JSON cannot carry functions, so `_transform` entries name a function in a
//! [`Functions`] registry instead. Malformed control entries are kept as
//! `Invalid` and reported when evaluation reaches them.

use crate::helpers::{to_int, to_js_string};
use crate::resolve::is_falsy;
use crate::types::{Expr, Mapping, Selector, Transform, TransformFn, SELECTOR_KEY, TRANSFORM_KEY};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Named transform functions available to JSON expressions.
#[derive(Clone, Default)]
pub struct Functions {
    functions: HashMap<String, Arc<TransformFn>>,
}

impl Functions {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with `int` (integer coercion, `null` on failure)
    /// and `string` (string conversion).
    pub fn with_builtins() -> Self {
        let mut functions = Functions::new();
        functions.register("int", |v| to_int(v).unwrap_or(Value::Null));
        functions.register("string", |v| Value::String(to_js_string(v)));
        functions
    }

    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(f));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<TransformFn>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("Functions").field("names", &names).finish()
    }
}

impl Expr {
    /// Builds an expression from a JSON shape with no named functions.
    pub fn from_json(value: &Value) -> Expr {
        Expr::from_json_with(value, &Functions::new())
    }

    /// Builds an expression from a JSON shape, resolving `_transform` names
    /// against `functions`.
    ///
    /// ```
    /// use json_mapper::{evaluate, Expr, Functions};
    /// use serde_json::json;
    ///
    /// let shape = json!({"id": {"_selector": "id", "_transform": "int"}});
    /// let expr = Expr::from_json_with(&shape, &Functions::with_builtins());
    ///
    /// assert_eq!(evaluate(&expr, &json!({"id": "7"})).unwrap(), json!({"id": 7}));
    /// ```
    pub fn from_json_with(value: &Value, functions: &Functions) -> Expr {
        match value {
            v if is_falsy(v) => Expr::Empty,
            Value::String(path) => Expr::Path(path.clone()),
            Value::Object(entries) => {
                let mut mapping = Mapping::new();
                for (key, entry) in entries {
                    match key.as_str() {
                        SELECTOR_KEY => mapping.selector = Some(selector_from_json(entry)),
                        TRANSFORM_KEY => {
                            mapping.transform = Some(transform_from_json(entry, functions))
                        }
                        _ => {
                            mapping
                                .fields
                                .push((key.clone(), Expr::from_json_with(entry, functions)));
                        }
                    }
                }
                Expr::Mapping(mapping)
            }
            other => Expr::Unsupported(other.clone()),
        }
    }
}

fn selector_from_json(value: &Value) -> Selector {
    match value {
        Value::String(path) => Selector::Path(path.clone()),
        other => Selector::Invalid(other.clone()),
    }
}

fn transform_from_json(value: &Value, functions: &Functions) -> Transform {
    match value {
        Value::String(name) => match functions.get(name) {
            Some(f) => Transform::Function(f),
            None => Transform::Invalid(value.clone()),
        },
        other => Transform::Invalid(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values_are_empty() {
        for v in [json!(null), json!(false), json!(0), json!("")] {
            assert!(matches!(Expr::from_json(&v), Expr::Empty), "{}", v);
        }
    }

    #[test]
    fn test_other_scalars_are_unsupported() {
        assert!(matches!(Expr::from_json(&json!(123)), Expr::Unsupported(_)));
        assert!(matches!(Expr::from_json(&json!(true)), Expr::Unsupported(_)));
        assert!(matches!(Expr::from_json(&json!(["a"])), Expr::Unsupported(_)));
    }

    #[test]
    fn test_control_keys_are_not_fields() {
        let expr = Expr::from_json(&json!({
            "_selector": "name",
            "first": "first",
            "_transform": "nope",
            "last": {"x": "y"}
        }));
        let Expr::Mapping(m) = expr else {
            panic!("expected mapping");
        };
        assert!(matches!(m.selector, Some(Selector::Path(ref p)) if p == "name"));
        assert!(matches!(m.transform, Some(Transform::Invalid(_))));
        let keys: Vec<&str> = m.fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["first", "last"]);
    }

    #[test]
    fn test_non_string_selector_is_invalid() {
        let Expr::Mapping(m) = Expr::from_json(&json!({"_selector": 5})) else {
            panic!("expected mapping");
        };
        assert!(matches!(m.selector, Some(Selector::Invalid(_))));
    }

    #[test]
    fn test_registered_transform_resolves() {
        let mut functions = Functions::new();
        functions.register("upper", |v| {
            Value::String(v.as_str().unwrap_or_default().to_uppercase())
        });
        let Expr::Mapping(m) = Expr::from_json_with(&json!({"_transform": "upper"}), &functions)
        else {
            panic!("expected mapping");
        };
        assert!(matches!(m.transform, Some(Transform::Function(_))));
    }

    #[test]
    fn test_builtins() {
        let functions = Functions::with_builtins();
        assert!(functions.contains("int"));
        assert!(functions.contains("string"));
        assert!(!functions.contains("date"));
        assert_eq!(format!("{:?}", functions), r#"Functions { names: ["int", "string"] }"#);
    }
}
