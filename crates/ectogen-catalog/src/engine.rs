use std::fmt;

use crate::error::CatalogError;

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    MySql,
    Postgres,
}

impl Engine {
    /// Detect the engine from a connection URL scheme.
    pub fn from_url(url: &str) -> Result<Self, CatalogError> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .unwrap_or_default()
            .to_ascii_lowercase();
        match scheme.as_str() {
            "mysql" | "mariadb" => Ok(Engine::MySql),
            "postgres" | "postgresql" => Ok(Engine::Postgres),
            _ => Err(CatalogError::UnsupportedEngine(scheme)),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::MySql => f.write_str("mysql"),
            Engine::Postgres => f.write_str("postgres"),
        }
    }
}
