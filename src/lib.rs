//! flatdb - an embedded, single-node, in-memory query engine over flat
//! CSV files
//!
//! Tables are loaded once from delimited sources, equality hash indexes
//! are built over declared key columns, and queries are limited to
//! equality-predicate selections, projections, and equi-joins. There is no
//! query language, no mutation path, and no durability.

pub mod catalog;
pub mod query;
pub mod table;
