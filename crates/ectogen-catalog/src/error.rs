use thiserror::Error;

use crate::engine::Engine;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unsupported database URL scheme '{0}' (expected mysql:// or postgres://)")]
    UnsupportedEngine(String),
    #[error("no database selected: set `schema` for the repository or name a database in the URL")]
    MissingSchema,
    #[error("connect to {engine}: {source}")]
    Connect {
        engine: Engine,
        #[source]
        source: sqlx::Error,
    },
    #[error("table '{0}' is not in the catalog")]
    UnknownTable(String),
    #[error("read {what}: {source}")]
    Query {
        what: String,
        #[source]
        source: sqlx::Error,
    },
}

impl CatalogError {
    pub(crate) fn query(what: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let what = what.into();
        move |source| CatalogError::Query { what, source }
    }
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid {field} pattern '{pattern}': {source}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
