//! Access-path selection
//!
//! Given the set of column names a template references, pick the index to
//! probe: any index whose full column set is covered by the referenced set
//! qualifies, and the widest one wins. Ties go to the first qualifying
//! index in definition order, which makes selection deterministic.

use std::collections::HashSet;

use crate::table::{Index, Table};

/// The chosen way to evaluate a template against a table.
#[derive(Debug)]
pub enum AccessPath<'a> {
    /// Probe this index with a composite key built from the template.
    Probe { index: &'a Index },
    /// No usable index; scan every row.
    Scan,
}

impl<'a> AccessPath<'a> {
    /// Number of template columns the chosen index covers. `Scan` reports
    /// 0, strictly below any real index width (the catalog rejects empty
    /// index column lists), so the join heuristic can compare sides
    /// uniformly.
    pub fn width(&self) -> usize {
        match self {
            AccessPath::Probe { index } => index.width(),
            AccessPath::Scan => 0,
        }
    }

    /// Whether no index qualified.
    pub fn is_scan(&self) -> bool {
        matches!(self, AccessPath::Scan)
    }
}

/// Selects the access path for a template's referenced columns.
///
/// Derived tables have no indexes and always scan.
pub fn select_access_path<'a>(table: &'a Table, referenced: &HashSet<&str>) -> AccessPath<'a> {
    let mut best: Option<&Index> = None;
    for index in table.indexes() {
        let covered = index
            .columns()
            .iter()
            .all(|column| referenced.contains(column.as_str()));
        if covered && best.map_or(true, |b| index.width() > b.width()) {
            best = Some(index);
        }
    }
    match best {
        Some(index) => AccessPath::Probe { index },
        None => AccessPath::Scan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ColumnDef, IndexDef, IndexKind, TableSchema};
    use std::fs;
    use tempfile::TempDir;

    fn indexed_table(dir: &TempDir) -> Table {
        let path = dir.path().join("batting.csv");
        fs::write(
            &path,
            "playerID,yearID,stint,teamID\naaronha01,1954,1,ML1\n",
        )
        .unwrap();

        let schema = TableSchema::new("batting", path)
            .with_column(ColumnDef::text("playerID"))
            .with_column(ColumnDef::text("yearID"))
            .with_column(ColumnDef::text("stint"))
            .with_column(ColumnDef::text("teamID"))
            .with_index(IndexDef::new("by_player", IndexKind::Index, ["playerID"]))
            .with_index(IndexDef::new(
                "batting_pk",
                IndexKind::Primary,
                ["playerID", "yearID", "stint"],
            ))
            .with_index(IndexDef::new("by_team", IndexKind::Index, ["teamID"]));

        let mut catalog = Catalog::new();
        catalog.register(schema).unwrap();
        Table::load("batting", &catalog).unwrap()
    }

    #[test]
    fn test_widest_covered_index_wins() {
        let dir = TempDir::new().unwrap();
        let table = indexed_table(&dir);

        let referenced: HashSet<&str> = ["playerID", "yearID", "stint", "teamID"]
            .into_iter()
            .collect();
        match select_access_path(&table, &referenced) {
            AccessPath::Probe { index } => assert_eq!(index.name(), "batting_pk"),
            AccessPath::Scan => panic!("expected an index"),
        }
    }

    #[test]
    fn test_partial_coverage_disqualifies() {
        let dir = TempDir::new().unwrap();
        let table = indexed_table(&dir);

        // Covers by_player but not batting_pk (stint is missing).
        let referenced: HashSet<&str> = ["playerID", "yearID"].into_iter().collect();
        match select_access_path(&table, &referenced) {
            AccessPath::Probe { index } => assert_eq!(index.name(), "by_player"),
            AccessPath::Scan => panic!("expected an index"),
        }
    }

    #[test]
    fn test_tie_goes_to_definition_order() {
        let dir = TempDir::new().unwrap();
        let table = indexed_table(&dir);

        // by_player and by_team both qualify with width 1; by_player is
        // declared first.
        let referenced: HashSet<&str> = ["playerID", "teamID"].into_iter().collect();
        match select_access_path(&table, &referenced) {
            AccessPath::Probe { index } => assert_eq!(index.name(), "by_player"),
            AccessPath::Scan => panic!("expected an index"),
        }
    }

    #[test]
    fn test_no_qualifying_index() {
        let dir = TempDir::new().unwrap();
        let table = indexed_table(&dir);

        let referenced: HashSet<&str> = ["yearID"].into_iter().collect();
        let path = select_access_path(&table, &referenced);
        assert!(path.is_scan());
        assert_eq!(path.width(), 0);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let table = indexed_table(&dir);
        let referenced: HashSet<&str> = ["playerID", "teamID"].into_iter().collect();

        for _ in 0..50 {
            match select_access_path(&table, &referenced) {
                AccessPath::Probe { index } => assert_eq!(index.name(), "by_player"),
                AccessPath::Scan => panic!("expected an index"),
            }
        }
    }

    #[test]
    fn test_derived_table_always_scans() {
        let dir = TempDir::new().unwrap();
        let table = indexed_table(&dir);
        let derived = table.find(None, None).unwrap();

        let referenced: HashSet<&str> = ["playerID"].into_iter().collect();
        assert!(select_access_path(&derived, &referenced).is_scan());
    }
}
