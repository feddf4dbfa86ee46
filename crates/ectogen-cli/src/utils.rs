use std::path::Path;

use anyhow::{Context, Result, bail};
use ectogen_config::{CONFIG_FILE, EctogenConfig};
use ectogen_core::TableDef;
use tracing_subscriber::EnvFilter;

/// Load the config file.
///
/// An explicit path must exist. Without one, `ectogen.json` in the current
/// directory is read when present; otherwise an empty config is used.
pub fn load_config(path: Option<&Path>) -> Result<EctogenConfig> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            path
        }
        None => {
            let path = Path::new(CONFIG_FILE);
            if !path.exists() {
                tracing::debug!("no {CONFIG_FILE} found, using built-in defaults");
                return Ok(EctogenConfig::empty());
            }
            path
        }
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    let config: EctogenConfig = serde_json::from_str(&content)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}

/// Load a table snapshot written by `ectogen inspect`.
pub async fn load_snapshot(path: &Path) -> Result<Vec<TableDef>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read catalog snapshot: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parse catalog snapshot: {}", path.display()))
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
