//! Catalog readers for MySQL and PostgreSQL.
//!
//! Each engine implements [`Catalog`] over `information_schema`;
//! [`read_tables`] turns a catalog into [`ectogen_core::TableDef`]s.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod filter;
pub mod mysql;
pub mod postgres;

pub use catalog::{Catalog, SnapshotCatalog, assemble_table, connect, read_tables};
pub use engine::Engine;
pub use error::{CatalogError, FilterError};
pub use filter::TableFilter;
pub use mysql::MySqlCatalog;
pub use postgres::PostgresCatalog;
