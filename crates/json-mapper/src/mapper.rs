//! A reusable mapper bundling an expression with its configuration.

use crate::config::MapperConfig;
use crate::error::MapError;
use crate::evaluate::evaluate_with;
use crate::types::Expr;
use serde_json::Value;

/// An expression ready to be applied to many inputs.
///
/// Holds no state between calls; share it freely across threads.
#[derive(Clone, Debug)]
pub struct Mapper {
    expression: Expr,
    config: MapperConfig,
}

impl Mapper {
    pub fn new(expression: impl Into<Expr>) -> Self {
        Mapper {
            expression: expression.into(),
            config: MapperConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn map(&self, data: &Value) -> Result<Value, MapError> {
        evaluate_with(&self.expression, data, &self.config)
    }
}
