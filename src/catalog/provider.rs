//! Metadata provider: the read-only schema registry consumed by the engine
//!
//! Schemas live in a directory of JSON files, one per table, or are
//! registered programmatically. Table construction asks the provider for a
//! schema exactly once; a failure there is fatal to construction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::errors::{CatalogError, CatalogResult};
use super::types::TableSchema;

/// Read-only source of table schemas.
///
/// The engine never asks the provider to mutate schema as part of querying.
pub trait MetadataProvider {
    /// Returns the schema for the named table.
    fn get_schema(&self, table: &str) -> CatalogResult<TableSchema>;
}

/// In-memory schema registry, optionally populated from a directory of
/// JSON schema files.
#[derive(Debug, Default)]
pub struct Catalog {
    schemas: HashMap<String, TableSchema>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Loads every `.json` schema file from a directory.
    ///
    /// Each file holds one `TableSchema`. Unreadable files, invalid JSON,
    /// and schemas failing validation are all fatal.
    pub fn load_dir(&mut self, dir: &Path) -> CatalogResult<()> {
        let entries = fs::read_dir(dir)
            .map_err(|e| CatalogError::malformed(dir.display().to_string(), e.to_string()))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| CatalogError::malformed(dir.display().to_string(), e.to_string()))?;
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            self.load_schema_file(&path)?;
        }

        Ok(())
    }

    fn load_schema_file(&mut self, path: &Path) -> CatalogResult<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::malformed(path.display().to_string(), e.to_string()))?;

        let schema: TableSchema = serde_json::from_str(&content)
            .map_err(|e| CatalogError::malformed(path.display().to_string(), e.to_string()))?;

        self.register(schema)
    }

    /// Registers a schema directly.
    ///
    /// The schema is validated first; registering a second schema under the
    /// same table name is an error (schemas are immutable once loaded).
    pub fn register(&mut self, schema: TableSchema) -> CatalogResult<()> {
        schema.validate()?;
        if self.schemas.contains_key(&schema.name) {
            return Err(CatalogError::AlreadyRegistered(schema.name));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Checks whether a table name is registered.
    pub fn contains(&self, table: &str) -> bool {
        self.schemas.contains_key(table)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl MetadataProvider for Catalog {
    fn get_schema(&self, table: &str) -> CatalogResult<TableSchema> {
        self.schemas
            .get(table)
            .cloned()
            .ok_or_else(|| CatalogError::SchemaNotFound(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{ColumnDef, IndexDef, IndexKind};
    use tempfile::TempDir;

    fn sample_schema() -> TableSchema {
        TableSchema::new("people", "/data/people.csv")
            .with_column(ColumnDef::text_not_null("playerID"))
            .with_column(ColumnDef::text("nameLast"))
            .with_index(IndexDef::new("people_pk", IndexKind::Primary, ["playerID"]))
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = Catalog::new();
        catalog.register(sample_schema()).unwrap();

        let schema = catalog.get_schema("people").unwrap();
        assert_eq!(schema.name, "people");
        assert_eq!(schema.columns.len(), 2);
    }

    #[test]
    fn test_unknown_table() {
        let catalog = Catalog::new();
        let result = catalog.get_schema("nonexistent");
        assert!(matches!(result, Err(CatalogError::SchemaNotFound(_))));
    }

    #[test]
    fn test_register_twice_fails() {
        let mut catalog = Catalog::new();
        catalog.register(sample_schema()).unwrap();

        let result = catalog.register(sample_schema());
        assert!(matches!(result, Err(CatalogError::AlreadyRegistered(_))));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_register_validates() {
        let mut catalog = Catalog::new();
        let invalid = TableSchema::new("empty", "/data/empty.csv");
        assert!(matches!(
            catalog.register(invalid),
            Err(CatalogError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_load_dir() {
        let dir = TempDir::new().unwrap();
        let schema = sample_schema();
        let path = dir.path().join("people.json");
        fs::write(&path, serde_json::to_string_pretty(&schema).unwrap()).unwrap();
        // Non-JSON files are skipped
        fs::write(dir.path().join("README.txt"), "not a schema").unwrap();

        let mut catalog = Catalog::new();
        catalog.load_dir(dir.path()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("people"));
    }

    #[test]
    fn test_load_dir_malformed_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let mut catalog = Catalog::new();
        let result = catalog.load_dir(dir.path());
        assert!(matches!(result, Err(CatalogError::Malformed { .. })));
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no_such_dir");

        let mut catalog = Catalog::new();
        assert!(catalog.load_dir(&missing).is_err());
    }
}
