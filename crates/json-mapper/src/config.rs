use crate::resolve::pluck;
use crate::types::MapFn;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Evaluation configuration.
///
/// Holds the path resolver used for string expressions and string
/// selectors. The default resolver is [`pluck`].
#[derive(Clone)]
pub struct MapperConfig {
    pub map_fn: Arc<MapFn>,
}

impl MapperConfig {
    pub fn new<F>(map_fn: F) -> Self
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        MapperConfig {
            map_fn: Arc::new(map_fn),
        }
    }

    /// Resolves `path` against `data` with the configured resolver.
    pub fn resolve(&self, path: &str, data: &Value) -> Value {
        (self.map_fn)(path, data)
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig::new(pluck)
    }
}

impl fmt::Debug for MapperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperConfig").finish_non_exhaustive()
    }
}
