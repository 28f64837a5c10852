use thiserror::Error;

/// Fatal errors raised for malformed expression structure.
///
/// Malformed *data* never errors; it degrades to `null`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("InvalidSelector: expected a path string or a function, found {0}")]
    InvalidSelector(&'static str),

    #[error("InvalidTransform: expected a function, found {0}")]
    InvalidTransform(&'static str),
}
