//! Query subsystem: access-path selection, equality selection, equi-joins
//!
//! Predicates are *templates*: field-to-value maps matched by exact string
//! equality. Evaluation order for `find` (strict):
//!
//! 1. Normalize (empty template / empty field list become "unspecified")
//! 2. Select an access path over the template's referenced columns
//! 3. Probe the chosen index, or fall back to full scan
//! 4. Re-filter through the full template
//! 5. Project to the requested fields
//! 6. Return a Derived table
//!
//! Every result is a Derived table, so any further query against it is a
//! full scan.

use std::collections::HashMap;

mod access;
mod executor;
mod join;

pub use access::{select_access_path, AccessPath};
pub use executor::matches;

/// An equality predicate: field name to required value.
///
/// `None` (or an empty template) matches every row.
pub type Template = HashMap<String, String>;
