//! Runtime equality hash indexes
//!
//! An index maps a composite key to the row positions sharing that key, in
//! load order. The key is the ordered tuple of the row's values for the
//! index columns; keeping it structured (rather than joining the values
//! with a separator) means distinct value tuples can never collide.
//!
//! Indexes are built exactly once, immediately after row loading. There is
//! no incremental maintenance because no mutation operations exist, and no
//! uniqueness check regardless of the declared kind.

use std::collections::HashMap;

use crate::catalog::{IndexDef, IndexKind};

use super::errors::{TableError, TableResult};
use super::row::Row;

/// Ordered tuple of key-column values.
pub type CompositeKey = Vec<String>;

/// An equality hash index over one table's rows.
#[derive(Debug)]
pub struct Index {
    name: String,
    kind: IndexKind,
    columns: Vec<String>,
    buckets: HashMap<CompositeKey, Vec<usize>>,
}

impl Index {
    /// Builds an index over the full row sequence, in load order.
    ///
    /// A key column absent from any row fails construction with
    /// `InvalidField`.
    pub fn build(def: &IndexDef, rows: &[Row]) -> TableResult<Self> {
        let mut buckets: HashMap<CompositeKey, Vec<usize>> = HashMap::new();
        for (position, row) in rows.iter().enumerate() {
            let key = composite_key(&def.columns, |column| row.get(column))?;
            buckets.entry(key).or_default().push(position);
        }
        Ok(Self {
            name: def.name.clone(),
            kind: def.kind,
            columns: def.columns.clone(),
            buckets,
        })
    }

    /// Index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind (metadata only; never enforced).
    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Key columns, in declared order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of key columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    /// Row positions for a key, in insertion order. A missing key yields an
    /// empty bucket, not an error.
    pub fn bucket(&self, key: &CompositeKey) -> &[usize] {
        self.buckets.get(key).map_or(&[], Vec::as_slice)
    }

    /// Iterates all buckets.
    pub fn buckets(&self) -> impl Iterator<Item = (&CompositeKey, &[usize])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Builds the composite key for a template that covers this index's
    /// columns (the access-path selector guarantees coverage).
    pub fn key_from<'a>(
        &self,
        lookup: impl Fn(&str) -> Option<&'a str>,
    ) -> TableResult<CompositeKey> {
        composite_key(&self.columns, lookup)
    }
}

fn composite_key<'a>(
    columns: &[String],
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> TableResult<CompositeKey> {
    columns
        .iter()
        .map(|column| {
            lookup(column)
                .map(str::to_string)
                .ok_or_else(|| TableError::InvalidField(column.clone()))
        })
        .collect()
}
