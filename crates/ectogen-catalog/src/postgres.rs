use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::catalog::Catalog;
use crate::engine::Engine;
use crate::error::CatalogError;

/// Schema read when the repository does not name one.
pub const DEFAULT_SCHEMA: &str = "public";

pub const TABLES_QUERY: &str = "\
SELECT table_name::text \
FROM information_schema.tables \
WHERE table_schema = $1 AND table_type = 'BASE TABLE' \
ORDER BY table_name";

pub const COLUMNS_QUERY: &str = "\
SELECT column_name::text, data_type::text \
FROM information_schema.columns \
WHERE table_schema = $1 AND table_name = $2 \
ORDER BY ordinal_position";

pub const PRIMARY_KEYS_QUERY: &str = "\
SELECT c.column_name::text \
FROM information_schema.table_constraints tc \
JOIN information_schema.constraint_column_usage ccu \
  ON ccu.constraint_schema = tc.constraint_schema \
 AND ccu.constraint_name = tc.constraint_name \
JOIN information_schema.columns c \
  ON c.table_schema = tc.table_schema \
 AND c.table_name = tc.table_name \
 AND c.column_name = ccu.column_name \
WHERE tc.constraint_type = 'PRIMARY KEY' \
  AND tc.table_schema = $1 \
  AND tc.table_name = $2 \
ORDER BY c.ordinal_position";

pub struct PostgresCatalog {
    pool: PgPool,
    schema: String,
}

impl PostgresCatalog {
    pub async fn connect(url: &str, schema: Option<&str>) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|source| CatalogError::Connect {
                engine: Engine::Postgres,
                source,
            })?;

        let schema = schema.unwrap_or(DEFAULT_SCHEMA).to_string();
        tracing::debug!(schema = %schema, "using postgres schema");

        Ok(Self { pool, schema })
    }
}

#[async_trait]
impl Catalog for PostgresCatalog {
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
