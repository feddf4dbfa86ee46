use std::collections::HashSet;

use async_trait::async_trait;
use ectogen_core::{ColumnDef, TableDef};

use crate::engine::Engine;
use crate::error::CatalogError;
use crate::filter::TableFilter;
use crate::mysql::MySqlCatalog;
use crate::postgres::PostgresCatalog;

/// Engine-specific access to the database catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Base tables of the configured schema, in listing order.
    async fn list_tables(&self) -> Result<Vec<String>, CatalogError>;

    /// `(column name, raw SQL type)` pairs in ordinal order.
    async fn list_columns(&self, table: &str) -> Result<Vec<(String, String)>, CatalogError>;

    /// Names of the primary key columns of `table`.
    async fn primary_keys(&self, table: &str) -> Result<Vec<String>, CatalogError>;
}

/// Open a catalog for the engine named by the URL scheme.
pub async fn connect(url: &str, schema: Option<&str>) -> Result<Box<dyn Catalog>, CatalogError> {
    let engine = Engine::from_url(url)?;
    tracing::info!(%engine, schema, "connecting");
    match engine {
        Engine::MySql => Ok(Box::new(MySqlCatalog::connect(url, schema).await?)),
        Engine::Postgres => Ok(Box::new(PostgresCatalog::connect(url, schema).await?)),
    }
}

/// Read every table allowed by `filter`, with columns and primary key flags.
///
/// The first failing query aborts the read.
pub async fn read_tables(
    catalog: &dyn Catalog,
    filter: &TableFilter,
) -> Result<Vec<TableDef>, CatalogError> {
    let mut tables = Vec::new();
    for name in catalog.list_tables().await? {
        if !filter.allows(&name) {
            tracing::debug!(table = %name, "skipped by filter");
            continue;
        }
        let columns = catalog.list_columns(&name).await?;
        let primary_keys = catalog.primary_keys(&name).await?;
        tracing::debug!(
            table = %name,
            columns = columns.len(),
            primary_keys = primary_keys.len(),
            "read table"
        );
        tables.push(assemble_table(name, columns, &primary_keys));
    }
    Ok(tables)
}

/// Combine catalog rows into a [`TableDef`].
pub fn assemble_table(
    name: String,
    columns: Vec<(String, String)>,
    primary_keys: &[String],
) -> TableDef {
    let keys: HashSet<&str> = primary_keys.iter().map(String::as_str).collect();
    let columns = columns
        .into_iter()
        .map(|(column, raw_type)| {
            let primary_key = keys.contains(column.as_str());
            ColumnDef::new(column, raw_type, primary_key)
        })
        .collect();
    TableDef::new(name, columns)
}

/// Catalog backed by already-loaded table definitions, such as a JSON
/// snapshot written by `ectogen inspect`.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCatalog {
    tables: Vec<TableDef>,
}

impl SnapshotCatalog {
    pub fn new(tables: Vec<TableDef>) -> Self {
        Self { tables }
    }

    fn table(&self, name: &str) -> Result<&TableDef, CatalogError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| CatalogError::UnknownTable(name.to_string()))
    }
}

#[async_trait]
impl Catalog for SnapshotCatalog {
    async fn list_tables(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<(String, String)>, CatalogError> {
        Ok(self
            .table(table)?
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.raw_type.clone()))
            .collect())
    }

    async fn primary_keys(&self, table: &str) -> Result<Vec<String>, CatalogError> {
        Ok(self
            .table(table)?
            .primary_key_columns()
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}
