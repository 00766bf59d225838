//! CSV row loading
//!
//! Reads delimited records from a schema's source file, using the first
//! record as a header naming source fields, and materializes one `Row` per
//! record holding exactly the declared columns in declared order. Source
//! columns that are not declared are silently dropped; a declared column
//! absent from the header is a fatal load error.

use csv::ReaderBuilder;

use crate::catalog::TableSchema;

use super::errors::{TableError, TableResult};
use super::row::{Row, RowLayout};

/// Loads the full row sequence for a schema. No partial load: any read or
/// parse failure aborts with `InvalidSource`.
pub(crate) fn load_rows(schema: &TableSchema) -> TableResult<Vec<Row>> {
    let source = schema.source.display().to_string();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(&schema.source)
        .map_err(|e| TableError::invalid_source(&source, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| TableError::invalid_source(&source, e.to_string()))?
        .clone();

    // Resolve each declared column to its position in the source header.
    let positions = schema
        .columns
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|field| field == column.name)
                .ok_or_else(|| TableError::InvalidField(column.name.clone()))
        })
        .collect::<TableResult<Vec<usize>>>()?;

    let layout = RowLayout::new(schema.column_names());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TableError::invalid_source(&source, e.to_string()))?;
        let values = positions
            .iter()
            .zip(schema.columns.iter())
            .map(|(&pos, column)| {
                record
                    .get(pos)
                    .map(str::to_string)
                    .ok_or_else(|| TableError::InvalidField(column.name.clone()))
            })
            .collect::<TableResult<Vec<String>>>()?;
        rows.push(Row::new(layout.clone(), values));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColumnDef;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_projects_declared_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "batting.csv",
            "playerID,yearID,stint,teamID,lgID\n\
             aaronha01,1954,1,ML1,NL\n\
             aaronha01,1955,1,ML1,NL\n",
        );

        // lgID is present in the source but not declared: it is dropped.
        let schema = TableSchema::new("batting", path)
            .with_column(ColumnDef::text("playerID"))
            .with_column(ColumnDef::text("yearID"))
            .with_column(ColumnDef::text("teamID"));

        let rows = load_rows(&schema).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].columns(), ["playerID", "yearID", "teamID"]);
        assert_eq!(rows[0].get("teamID"), Some("ML1"));
        assert_eq!(rows[0].get("lgID"), None);
        assert_eq!(rows[1].get("yearID"), Some("1955"));
    }

    #[test]
    fn test_quoted_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "people.csv",
            "playerID,nameGiven\naaronha01,\"Henry, Louis\"\n",
        );
        let schema = TableSchema::new("people", path)
            .with_column(ColumnDef::text("playerID"))
            .with_column(ColumnDef::text("nameGiven"));

        let rows = load_rows(&schema).unwrap();
        assert_eq!(rows[0].get("nameGiven"), Some("Henry, Louis"));
    }

    #[test]
    fn test_declared_column_missing_from_header() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "batting.csv", "playerID,yearID\naaronha01,1954\n");
        let schema = TableSchema::new("batting", path)
            .with_column(ColumnDef::text("playerID"))
            .with_column(ColumnDef::text("teamID"));

        match load_rows(&schema) {
            Err(TableError::InvalidField(field)) => assert_eq!(field, "teamID"),
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_source() {
        let schema = TableSchema::new("ghost", "/no/such/file.csv")
            .with_column(ColumnDef::text("playerID"));

        match load_rows(&schema) {
            Err(TableError::InvalidSource { .. }) => {}
            other => panic!("expected InvalidSource, got {other:?}"),
        }
    }

    #[test]
    fn test_rows_share_one_layout() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "a,b\n1,2\n3,4\n");
        let schema = TableSchema::new("t", path)
            .with_column(ColumnDef::text("a"))
            .with_column(ColumnDef::text("b"));

        let rows = load_rows(&schema).unwrap();
        assert!(std::sync::Arc::ptr_eq(rows[0].layout(), rows[1].layout()));
    }
}
