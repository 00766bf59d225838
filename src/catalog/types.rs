//! Schema type definitions
//!
//! A table schema names the CSV source, the declared columns (which may be
//! a subset of the columns present in the file), and the index definitions.
//! Schemas are authored externally and are read-only to the engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};

/// Declared column type. Descriptive metadata only: the engine holds and
/// compares all values as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free-form text
    Text,
    /// Numeric-looking text
    Number,
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Text
    }
}

/// Column definition within a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name, unique within the table
    pub name: String,
    /// Declared type
    #[serde(default)]
    pub column_type: ColumnType,
    /// Whether the column is declared NOT NULL (not enforced)
    #[serde(default)]
    pub not_null: bool,
}

impl ColumnDef {
    /// Create a text column
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Text,
            not_null: false,
        }
    }

    /// Create a NOT NULL text column
    pub fn text_not_null(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Text,
            not_null: true,
        }
    }

    /// Create a number column
    pub fn number(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Number,
            not_null: false,
        }
    }
}

/// Index kind. Descriptive metadata only: the engine builds the same hash
/// structure for all kinds and never rejects duplicate keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Primary => "primary",
            IndexKind::Unique => "unique",
            IndexKind::Index => "index",
        }
    }
}

/// Index definition within a table schema.
///
/// Column order is semantically significant: it defines composite-key
/// construction order and is preserved exactly as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    /// Index name, unique within the table
    pub name: String,
    /// Index kind (metadata only)
    pub kind: IndexKind,
    /// Ordered key columns
    pub columns: Vec<String>,
}

impl IndexDef {
    pub fn new(
        name: impl Into<String>,
        kind: IndexKind,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Complete schema for one table: source location, ordered columns, indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Path to the CSV source file
    pub source: PathBuf,
    /// Ordered column definitions
    pub columns: Vec<ColumnDef>,
    /// Index definitions
    #[serde(default)]
    pub indexes: Vec<IndexDef>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Add a column definition (builder style)
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Add an index definition (builder style)
    pub fn with_index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    /// Declared column names, in schema order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Whether a column name is declared in this schema
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Validates the schema structure.
    ///
    /// Checks: table has a name and at least one column, column names are
    /// non-empty and unique, index names are unique, index column lists are
    /// non-empty and reference declared columns only.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.name.is_empty() {
            return Err(CatalogError::InvalidDefinition(
                "table name must not be empty".into(),
            ));
        }
        if self.columns.is_empty() {
            return Err(CatalogError::InvalidDefinition(format!(
                "table '{}' declares no columns",
                self.name
            )));
        }

        for (i, column) in self.columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(CatalogError::InvalidDefinition(format!(
                    "table '{}': column at position {} has an empty name",
                    self.name, i
                )));
            }
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(CatalogError::InvalidDefinition(format!(
                    "table '{}': duplicate column '{}'",
                    self.name, column.name
                )));
            }
        }

        for (i, index) in self.indexes.iter().enumerate() {
            if index.name.is_empty() {
                return Err(CatalogError::InvalidDefinition(format!(
                    "table '{}': index at position {} has an empty name",
                    self.name, i
                )));
            }
            if self.indexes[..i].iter().any(|x| x.name == index.name) {
                return Err(CatalogError::InvalidDefinition(format!(
                    "table '{}': duplicate index '{}'",
                    self.name, index.name
                )));
            }
            if index.columns.is_empty() {
                return Err(CatalogError::InvalidDefinition(format!(
                    "table '{}': index '{}' has no columns",
                    self.name, index.name
                )));
            }
            for column in &index.columns {
                if !self.has_column(column) {
                    return Err(CatalogError::InvalidDefinition(format!(
                        "table '{}': index '{}' references undeclared column '{}'",
                        self.name, index.name, column
                    )));
                }
            }
        }

        Ok(())
    }
}
