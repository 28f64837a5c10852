//! Expression tree.
//!
//! An [`Expr`] describes the shape of the output: a path pulled out of the
//! current data, or a [`Mapping`] of output fields to sub-expressions,
//! optionally re-scoped by a [`Selector`] and short-circuited by a
//! [`Transform`].

use crate::resolve::is_falsy;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Reserved key re-scoping the current data of a mapping.
pub const SELECTOR_KEY: &str = "_selector";

/// Reserved key computing the output of a mapping directly.
pub const TRANSFORM_KEY: &str = "_transform";

/// A selector function: receives the current data, returns the new scope.
pub type SelectorFn = dyn Fn(&Value) -> Value + Send + Sync;

/// A transform function: receives the (scoped) current data, returns the output.
pub type TransformFn = dyn Fn(&Value) -> Value + Send + Sync;

/// A path resolver: maps a path string and the current data to a value.
pub type MapFn = dyn Fn(&str, &Value) -> Value + Send + Sync;

/// A transformation expression.
#[derive(Clone, Debug, Default)]
pub enum Expr {
    /// No expression: the data passes through unchanged.
    #[default]
    Empty,
    /// A path resolved against the current data by the configured resolver.
    Path(String),
    /// An object shape.
    Mapping(Mapping),
    /// Any other JSON value. Evaluates to `null`, or passes data through
    /// when the value itself is falsy.
    Unsupported(Value),
}

impl Expr {
    pub fn path(path: impl Into<String>) -> Self {
        Expr::Path(path.into())
    }

    /// Returns `true` for expressions that behave as "no expression".
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::Empty => true,
            Expr::Path(p) => p.is_empty(),
            Expr::Mapping(_) => false,
            Expr::Unsupported(v) => is_falsy(v),
        }
    }
}

impl From<&str> for Expr {
    fn from(path: &str) -> Self {
        Expr::Path(path.to_string())
    }
}

impl From<String> for Expr {
    fn from(path: String) -> Self {
        Expr::Path(path)
    }
}

impl From<Mapping> for Expr {
    fn from(mapping: Mapping) -> Self {
        Expr::Mapping(mapping)
    }
}

impl<T: Into<Expr>> From<Option<T>> for Expr {
    fn from(expr: Option<T>) -> Self {
        expr.map(Into::into).unwrap_or(Expr::Empty)
    }
}

/// Re-scopes the current data before the rest of a mapping is evaluated.
#[derive(Clone)]
pub enum Selector {
    Path(String),
    Function(Arc<SelectorFn>),
    /// A selector of the wrong type. Evaluating it fails with
    /// [`MapError::InvalidSelector`](crate::MapError::InvalidSelector).
    Invalid(Value),
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Selector::Function(_) => f.write_str("Function(..)"),
            Selector::Invalid(v) => f.debug_tuple("Invalid").field(v).finish(),
        }
    }
}

/// Directly computes the output of a mapping from its current data.
#[derive(Clone)]
pub enum Transform {
    Function(Arc<TransformFn>),
    /// A transform of the wrong type. Evaluating it fails with
    /// [`MapError::InvalidTransform`](crate::MapError::InvalidTransform).
    Invalid(Value),
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Function(_) => f.write_str("Function(..)"),
            Transform::Invalid(v) => f.debug_tuple("Invalid").field(v).finish(),
        }
    }
}

/// An object shape: ordered output fields plus the optional control entries.
#[derive(Clone, Debug, Default)]
pub struct Mapping {
    pub selector: Option<Selector>,
    pub transform: Option<Transform>,
    pub fields: Vec<(String, Expr)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output field. A later field with the same name replaces the
    /// earlier one in place.
    pub fn field(mut self, name: impl Into<String>, expr: impl Into<Expr>) -> Self {
        let name = name.into();
        let expr = expr.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = expr,
            None => self.fields.push((name, expr)),
        }
        self
    }

    /// Re-scopes the data to the value at `path`.
    pub fn select(mut self, path: impl Into<String>) -> Self {
        self.selector = Some(Selector::Path(path.into()));
        self
    }

    /// Re-scopes the data to the result of `f`.
    pub fn select_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.selector = Some(Selector::Function(Arc::new(f)));
        self
    }

    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Transform::Function(Arc::new(f)));
        self
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}
