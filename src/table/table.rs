//! In-memory tables
//!
//! A table is constructed in one of two modes and never changes mode:
//!
//! - **Loaded**: built by [`Table::load`] from a catalog schema; carries the
//!   schema and the equality indexes built at construction.
//! - **Derived**: produced by a query or join operation; carries rows only
//!   and is always answered by full scan.
//!
//! Tables are immutable after construction. The mutating operations exist
//! on the API surface but always fail with `Unsupported`.

use tracing::info;

use crate::catalog::{MetadataProvider, TableSchema};
use crate::query::Template;

use super::errors::{TableError, TableResult};
use super::index::Index;
use super::loader;
use super::row::Row;

/// Operating mode, fixed at construction.
#[derive(Debug)]
enum TableMode {
    /// Built from a schema; indexable.
    Loaded {
        schema: TableSchema,
        indexes: Vec<Index>,
    },
    /// Produced by a query or join; scan-only, never acquires indexes.
    Derived,
}

/// An in-memory table: a name, an ordered row sequence, and a mode.
#[derive(Debug)]
pub struct Table {
    name: String,
    mode: TableMode,
    rows: Vec<Row>,
}

impl Table {
    /// Constructs a Loaded table: fetches the schema from the provider,
    /// materializes all rows from the CSV source, then builds every
    /// declared index in definition order.
    ///
    /// Any failure is fatal to construction; there is no partial load.
    pub fn load(name: &str, provider: &dyn MetadataProvider) -> TableResult<Self> {
        let schema = provider.get_schema(name)?;
        let rows = loader::load_rows(&schema)?;

        let indexes = schema
            .indexes
            .iter()
            .map(|def| Index::build(def, &rows))
            .collect::<TableResult<Vec<Index>>>()?;

        info!(
            table = %schema.name,
            rows = rows.len(),
            indexes = indexes.len(),
            "table loaded"
        );

        Ok(Self {
            name: name.to_string(),
            mode: TableMode::Loaded { schema, indexes },
            rows,
        })
    }

    /// Constructs a Derived table from rows produced by an operation.
    pub(crate) fn derived(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            mode: TableMode::Derived,
            rows,
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The row sequence, in load or operation order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether this table was produced by a query or join.
    pub fn is_derived(&self) -> bool {
        matches!(self.mode, TableMode::Derived)
    }

    /// The schema, for Loaded tables.
    pub fn schema(&self) -> Option<&TableSchema> {
        match &self.mode {
            TableMode::Loaded { schema, .. } => Some(schema),
            TableMode::Derived => None,
        }
    }

    /// The built indexes. Empty for Derived tables.
    pub(crate) fn indexes(&self) -> &[Index] {
        match &self.mode {
            TableMode::Loaded { indexes, .. } => indexes,
            TableMode::Derived => &[],
        }
    }

    /// The table's column names: the schema columns for a Loaded table, the
    /// row layout's columns for a Derived one (empty if it has no rows).
    pub fn column_names(&self) -> Vec<String> {
        match &self.mode {
            TableMode::Loaded { schema, .. } => schema.column_names(),
            TableMode::Derived => self
                .rows
                .first()
                .map(|row| row.columns().to_vec())
                .unwrap_or_default(),
        }
    }

    /// Inserting rows is not supported on any table.
    pub fn insert(&mut self, _row: Row) -> TableResult<()> {
        Err(TableError::Unsupported("insert"))
    }

    /// Updating rows is not supported on any table.
    pub fn update(&mut self, _template: &Template, _changes: &Template) -> TableResult<()> {
        Err(TableError::Unsupported("update"))
    }

    /// Deleting rows is not supported on any table.
    pub fn delete(&mut self, _template: &Template) -> TableResult<()> {
        Err(TableError::Unsupported("delete"))
    }
}
