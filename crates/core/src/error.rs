//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog layer.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// The initial load is the only fallible operation in the browser; every
/// variant here describes one way that load can go wrong. Filtering and
/// language switches are total and never produce an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The data resource could not be read (network failure, missing file).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The payload was not valid JSON or did not match the record shape.
    #[error("malformed catalog payload: {0}")]
    Malformed(String),

    /// The payload parsed but broke a catalog invariant (empty positions,
    /// duplicate ids).
    #[error("catalog schema violated: {0}")]
    Schema(String),
}

impl CatalogError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
