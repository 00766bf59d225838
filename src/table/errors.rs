//! Table and query error types

use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for table and query operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised by table construction and query evaluation
#[derive(Debug, Clone, Error)]
pub enum TableError {
    /// The CSV source could not be opened or parsed. Fatal for table
    /// construction; no partial load occurs.
    #[error("invalid source {path}: {reason}")]
    InvalidSource { path: String, reason: String },

    /// A predicate, projection, or index definition referenced a field that
    /// is absent from a row or schema. Aborts the current operation without
    /// touching table state.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// Mutating operations are not supported on any table.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Schema lookup or validation failed in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl TableError {
    pub fn invalid_source(source: impl Into<String>, reason: impl Into<String>) -> Self {
        TableError::InvalidSource {
            path: source.into(),
            reason: reason.into(),
        }
    }
}
