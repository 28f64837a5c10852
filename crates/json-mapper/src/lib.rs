//! Declarative JSON data mapping.
//!
//! # Overview
//!
//! An expression describes the shape of the output. Evaluating it against
//! an input tree produces a new tree of that shape:
//!
//! - a string is a dot-separated path into the current data;
//! - a mapping lists output fields, each with its own sub-expression;
//! - a mapping's selector re-scopes the current data first;
//! - a mapping's transform computes the output directly from the data;
//! - array data is broadcast: the expression is applied to every element.
//!
//! # Example
//!
//! ```
//! use json_mapper::{evaluate, Expr, Mapping};
//! use serde_json::json;
//!
//! let expr: Expr = Mapping::new()
//!     .field("id", "id")
//!     .field("buyer", Mapping::new().field("name", "name"))
//!     .into();
//! let result = evaluate(&expr, &json!({"id": 1, "name": "John"})).unwrap();
//!
//! assert_eq!(result, json!({"id": 1, "buyer": {"name": "John"}}));
//! ```

pub mod config;
pub mod error;
pub mod evaluate;
pub mod from_json;
pub mod helpers;
pub mod mapper;
pub mod resolve;
pub mod types;

pub use config::MapperConfig;
pub use error::MapError;
pub use evaluate::{evaluate, evaluate_with};
pub use from_json::Functions;
pub use helpers::{as_int, coalesce};
pub use mapper::Mapper;
pub use resolve::{is_absent, is_falsy, lookup, pluck};
pub use types::{Expr, MapFn, Mapping, Selector, SelectorFn, Transform, TransformFn};
