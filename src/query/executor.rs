//! Equality selection and projection
//!
//! `find` evaluates a template against a table, by index probe when the
//! access-path selector finds a covered index, by full scan otherwise, and
//! projects the surviving rows. The result is always a Derived table.

use std::collections::HashSet;

use crate::table::{project_rows, Row, Table, TableError, TableResult};

use super::access::{select_access_path, AccessPath};
use super::Template;

/// Whether a row matches a template.
///
/// A `None` template matches every row. Otherwise every template key must
/// be present in the row (`InvalidField` if not) and compare string-equal;
/// all keys must match.
pub fn matches(row: &Row, template: Option<&Template>) -> TableResult<bool> {
    let Some(template) = template else {
        return Ok(true);
    };
    for (field, expected) in template {
        let actual = row
            .get(field)
            .ok_or_else(|| TableError::InvalidField(field.clone()))?;
        if actual != expected {
            return Ok(false);
        }
    }
    Ok(true)
}

impl Table {
    /// Selects rows matching the template and projects them to the
    /// requested fields, returning a new Derived table.
    ///
    /// An empty (or `None`) template matches all rows; an empty (or `None`)
    /// field list means no projection. Derived tables are always answered
    /// by full scan.
    pub fn find(
        &self,
        template: Option<&Template>,
        fields: Option<&[String]>,
    ) -> TableResult<Table> {
        let template = template.filter(|t| !t.is_empty());
        let fields = fields.filter(|f| !f.is_empty());

        let Some(template) = template else {
            return self.scan(None, fields);
        };
        if self.is_derived() {
            return self.scan(Some(template), fields);
        }

        let referenced: HashSet<&str> = template.keys().map(String::as_str).collect();
        match select_access_path(self, &referenced) {
            AccessPath::Scan => self.scan(Some(template), fields),
            AccessPath::Probe { index } => {
                // The selector guarantees the template covers the index's
                // columns; the key follows the index's declared order.
                let key = index.key_from(|column| template.get(column).map(String::as_str))?;

                let mut matched = Vec::new();
                for &position in index.bucket(&key) {
                    let row = &self.rows()[position];
                    // Re-filter through the full template: it may reference
                    // columns beyond the index's own.
                    if matches(row, Some(template))? {
                        matched.push(row.clone());
                    }
                }

                let projected = project_rows(&matched, fields)?;
                Ok(Table::derived(format!("probe:{}", self.name()), projected))
            }
        }
    }

    fn scan(&self, template: Option<&Template>, fields: Option<&[String]>) -> TableResult<Table> {
        let mut matched = Vec::new();
        for row in self.rows() {
            if matches(row, template)? {
                matched.push(row.clone());
            }
        }
        let projected = project_rows(&matched, fields)?;
        Ok(Table::derived(format!("scan:{}", self.name()), projected))
    }
}
