//! Catalog error types

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by the metadata catalog
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// No schema is registered under the requested table name
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// A schema file could not be read or parsed
    #[error("malformed schema {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// A schema failed structural validation
    #[error("invalid definition: {0}")]
    InvalidDefinition(String),

    /// A schema is already registered under this table name
    #[error("schema already registered: {0}")]
    AlreadyRegistered(String),
}

impl CatalogError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
