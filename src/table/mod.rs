//! In-memory table subsystem
//!
//! A Loaded table is materialized once, at construction:
//!
//! 1. Fetch the schema from the metadata provider
//! 2. Read every CSV record, keeping only the declared columns
//! 3. Build each declared equality index over the full row sequence
//!
//! Derived tables (the output of every query and join) carry rows only and
//! are always answered by full scan. No table mutates after construction.

mod errors;
mod index;
mod loader;
mod row;
mod table;

pub use errors::{TableError, TableResult};
pub use index::{CompositeKey, Index};
pub use row::{merge_rows, project_rows, Row, RowLayout};
pub use table::Table;
