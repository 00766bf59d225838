//! Row representation and the field projection/lookup primitive
//!
//! All rows produced by one operation (a load, a projection, a join) share
//! a single `RowLayout` behind an `Arc`: the ordered column names plus a
//! name-to-position map. Each row then carries only its values, positioned
//! by the shared layout. Rows are never mutated after creation.

use std::collections::HashMap;
use std::sync::Arc;

use super::errors::{TableError, TableResult};

/// Ordered column names with a name-to-position map, shared across all rows
/// of one operation's output.
#[derive(Debug)]
pub struct RowLayout {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl RowLayout {
    /// Builds a layout from an ordered column list.
    pub fn new(columns: Vec<String>) -> Arc<Self> {
        let positions = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Arc::new(Self { columns, positions })
    }

    /// Column names in layout order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Whether the layout contains a column.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the layout has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// An immutable row: a shared layout plus one value per layout column.
#[derive(Debug, Clone)]
pub struct Row {
    layout: Arc<RowLayout>,
    values: Vec<String>,
}

impl Row {
    /// Creates a row over a layout. `values` must be positioned per the
    /// layout's column order.
    pub fn new(layout: Arc<RowLayout>, values: Vec<String>) -> Self {
        debug_assert_eq!(layout.len(), values.len());
        Self { layout, values }
    }

    /// Builds a standalone row from (column, value) pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(RowLayout::new(columns), values)
    }

    /// The row's layout.
    pub fn layout(&self) -> &Arc<RowLayout> {
        &self.layout
    }

    /// Column names in layout order.
    pub fn columns(&self) -> &[String] {
        self.layout.columns()
    }

    /// Field lookup by column name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.layout
            .position(field)
            .map(|pos| self.values[pos].as_str())
    }

    /// (column, value) pairs in layout order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.layout
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Projects this row onto a prepared layout.
    ///
    /// Fails with `InvalidField` naming the first layout column absent from
    /// this row.
    pub fn project(&self, layout: &Arc<RowLayout>) -> TableResult<Row> {
        let values = layout
            .columns()
            .iter()
            .map(|field| {
                self.get(field)
                    .map(str::to_string)
                    .ok_or_else(|| TableError::InvalidField(field.clone()))
            })
            .collect::<TableResult<Vec<_>>>()?;
        Ok(Row::new(Arc::clone(layout), values))
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.layout.columns() == other.layout.columns() && self.values == other.values
    }
}

impl Eq for Row {}

/// Projects a row sequence onto an ordered field list.
///
/// A `None` (or empty) field list is a no-op request: the rows are returned
/// unchanged, not reduced to zero columns.
pub fn project_rows(rows: &[Row], fields: Option<&[String]>) -> TableResult<Vec<Row>> {
    match fields {
        None => Ok(rows.to_vec()),
        Some([]) => Ok(rows.to_vec()),
        Some(fields) => {
            let layout = RowLayout::new(fields.to_vec());
            rows.iter().map(|row| row.project(&layout)).collect()
        }
    }
}

/// Merges a matched left/right row pair.
///
/// The result carries the left row's columns followed by the right row's
/// columns not present on the left; on a name collision the left row's
/// value wins.
pub fn merge_rows(left: &Row, right: &Row) -> Row {
    let mut columns: Vec<String> = left.columns().to_vec();
    let mut values: Vec<String> = left.values.clone();
    for (column, value) in right.pairs() {
        if !left.layout.contains(column) {
            columns.push(column.to_string());
            values.push(value.to_string());
        }
    }
    Row::new(RowLayout::new(columns), values)
}
