//! Equi-joins
//!
//! Two strategies over the same contract:
//!
//! - [`Table::nested_loop_join`]: for every left row, scan the entire right
//!   table. The baseline; cost is |left| x |right|.
//! - [`Table::join`]: consults the access-path selector on both sides. If
//!   neither side has an index covering the on-columns, each side is
//!   pre-filtered with the part of the post-join template that belongs to
//!   it, then nested-loop joined. Otherwise the side with the narrower
//!   index match scans and the other side is probed per scan row.
//!
//! Side selection is a column-count heuristic, not a cardinality estimate.
//! Both strategies return the same multiset of rows; only row order and
//! cost differ. Join results are Derived tables and never carry indexes.

use std::collections::HashSet;

use tracing::debug;

use crate::table::{merge_rows, Row, Table, TableError, TableResult};

use super::access::select_access_path;
use super::executor::matches;
use super::Template;

impl Table {
    /// Baseline nested-loop equi-join.
    ///
    /// For each left row (in left order), every right row matching the
    /// left row's on-column values is merged in; the post-join template and
    /// projection are then applied through [`Table::find`].
    pub fn nested_loop_join(
        &self,
        right: &Table,
        on: &[String],
        template: Option<&Template>,
        fields: Option<&[String]>,
    ) -> TableResult<Table> {
        let mut merged = Vec::new();
        for left_row in self.rows() {
            let on_template = on_template(left_row, on)?;
            for right_row in right.rows() {
                if matches(right_row, Some(&on_template))? {
                    merged.push(merge_rows(left_row, right_row));
                }
            }
        }
        self.finish_join(right, merged, template, fields)
    }

    /// Heuristic equi-join.
    ///
    /// Produces the same row multiset as [`Table::nested_loop_join`]; the
    /// strategy only affects cost and row order.
    pub fn join(
        &self,
        right: &Table,
        on: &[String],
        template: Option<&Template>,
        fields: Option<&[String]>,
    ) -> TableResult<Table> {
        let on_set: HashSet<&str> = on.iter().map(String::as_str).collect();
        let left_width = select_access_path(self, &on_set).width();
        let right_width = select_access_path(right, &on_set).width();

        // Neither side qualifies: shrink both sides with the parts of the
        // post-join template they can each answer, then fall back to the
        // baseline with the original template (re-applying it is
        // idempotent).
        if left_width == 0 && right_width == 0 {
            debug!(
                left = %self.name(),
                right = %right.name(),
                strategy = "prefilter",
                "join"
            );
            let left_sub = sub_template(self, template);
            let right_sub = sub_template(right, template);
            let left_filtered = self.find(left_sub.as_ref(), None)?;
            let right_filtered = right.find(right_sub.as_ref(), None)?;
            return left_filtered.nested_loop_join(&right_filtered, on, template, fields);
        }

        // The side with the narrower index match scans; ties scan left.
        let left_scans = left_width <= right_width;
        let (scan, probe) = if left_scans {
            (self, right)
        } else {
            (right, self)
        };
        debug!(
            left = %self.name(),
            right = %right.name(),
            scan = %scan.name(),
            probe = %probe.name(),
            strategy = "probe",
            "join"
        );

        let mut merged = Vec::new();
        for scan_row in scan.rows() {
            let on_t = on_template(scan_row, on)?;
            let matched = probe.find(Some(&on_t), None)?;
            for probe_row in matched.rows() {
                // Merge keeps the join's left/right orientation even when
                // the right side is the one scanning.
                let row = if left_scans {
                    merge_rows(scan_row, probe_row)
                } else {
                    merge_rows(probe_row, scan_row)
                };
                merged.push(row);
            }
        }
        self.finish_join(right, merged, template, fields)
    }

    fn finish_join(
        &self,
        right: &Table,
        merged: Vec<Row>,
        template: Option<&Template>,
        fields: Option<&[String]>,
    ) -> TableResult<Table> {
        let joined = Table::derived(format!("join:{}:{}", self.name(), right.name()), merged);
        joined.find(template, fields)
    }
}

/// Field-to-value template over the on-columns, taken from one row.
fn on_template(row: &Row, on: &[String]) -> TableResult<Template> {
    on.iter()
        .map(|field| {
            row.get(field)
                .map(|value| (field.clone(), value.to_string()))
                .ok_or_else(|| TableError::InvalidField(field.clone()))
        })
        .collect()
}

/// The template keys that are columns of this table. Keys belonging to the
/// other side are dropped, not errors.
fn sub_template(table: &Table, template: Option<&Template>) -> Option<Template> {
    let template = template?;
    let columns = table.column_names();
    Some(
        template
            .iter()
            .filter(|(field, _)| columns.iter().any(|c| c == *field))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect(),
    )
}
