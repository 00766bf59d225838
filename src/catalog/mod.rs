//! Metadata catalog subsystem
//!
//! Schemas are authored and administered elsewhere; the engine only ever
//! reads them through the [`MetadataProvider`] trait. The bundled
//! [`Catalog`] keeps schemas in memory and can populate itself from a
//! directory of JSON schema files, one per table.

mod errors;
mod provider;
mod types;

pub use errors::{CatalogError, CatalogResult};
pub use provider::{Catalog, MetadataProvider};
pub use types::{ColumnDef, ColumnType, IndexDef, IndexKind, TableSchema};
