use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::catalog::Catalog;
use crate::engine::Engine;
use crate::error::CatalogError;

// information_schema columns are cast to CHAR: MySQL 8 reports several of
// them as binary strings.

pub const TABLES_QUERY: &str = "\
SELECT CAST(TABLE_NAME AS CHAR) \
FROM information_schema.tables \
WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE' \
ORDER BY TABLE_NAME";

pub const COLUMNS_QUERY: &str = "\
SELECT CAST(COLUMN_NAME AS CHAR), CAST(DATA_TYPE AS CHAR) \
FROM information_schema.columns \
WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
ORDER BY ORDINAL_POSITION";

pub const PRIMARY_KEYS_QUERY: &str = "\
SELECT CAST(COLUMN_NAME AS CHAR) \
FROM information_schema.columns \
WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND COLUMN_KEY = 'PRI' \
ORDER BY ORDINAL_POSITION";

const CURRENT_DATABASE_QUERY: &str = "SELECT DATABASE()";

pub struct MySqlCatalog {
    pool: MySqlPool,
    schema: String,
}

impl MySqlCatalog {
    /// Connect and resolve the schema, falling back to the connection's
    /// current database.
    pub async fn connect(url: &str, schema: Option<&str>) -> Result<Self, CatalogError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|source| CatalogError::Connect {
                engine: Engine::MySql,
                source,
            })?;

        let schema = match schema {
            Some(schema) => schema.to_string(),
            None => sqlx::query_scalar::<_, Option<String>>(CURRENT_DATABASE_QUERY)
                .fetch_one(&pool)
                .await
                .map_err(CatalogError::query("current database"))?
                .ok_or(CatalogError::MissingSchema)?,
        };
        tracing::debug!(schema = %schema, "using mysql schema");

        Ok(Self { pool, schema })
    }
}

#[async_trait]
impl Catalog for MySqlCatalog {
    async fn list_tables(&self) -> Result<Vec<String>, CatalogError> {
        sqlx::query_scalar(TABLES_QUERY)
            .bind(&self.schema)
            .fetch_all(&self.pool)
            .await
            .map_err(CatalogError::query(format!("tables of {}", self.schema)))
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<(String, String)>, CatalogError> {
        sqlx::query_as(COLUMNS_QUERY)
            .bind(&self.schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(CatalogError::query(format!("columns of {table}")))
    }

    async fn primary_keys(&self, table: &str) -> Result<Vec<String>, CatalogError> {
        sqlx::query_scalar(PRIMARY_KEYS_QUERY)
            .bind(&self.schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(CatalogError::query(format!("primary key of {table}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_query_filters_schema_and_base_tables() {
        assert!(TABLES_QUERY.contains("information_schema.tables"));
        assert!(TABLES_QUERY.contains("TABLE_SCHEMA = ?"));
        assert!(TABLES_QUERY.contains("'BASE TABLE'"));
    }

    #[test]
    fn primary_keys_use_column_key() {
        assert!(PRIMARY_KEYS_QUERY.contains("information_schema.columns"));
        assert!(PRIMARY_KEYS_QUERY.contains("COLUMN_KEY = 'PRI'"));
    }

    #[test]
    fn columns_query_keeps_ordinal_order() {
        assert!(COLUMNS_QUERY.ends_with("ORDER BY ORDINAL_POSITION"));
        assert_eq!(COLUMNS_QUERY.matches('?').count(), 2);
    }
}
