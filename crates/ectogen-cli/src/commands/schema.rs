use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ectogen_config::EctogenConfig;
use ectogen_core::TableDef;
use schemars::schema_for;

/// Write JSON Schemas for `ectogen.json` and catalog snapshots into `out`.
pub fn cmd_schema(out: &Path) -> Result<()> {
    if !out.exists() {
        fs::create_dir_all(out).with_context(|| format!("create dir {}", out.display()))?;
    }

    let config_schema = schema_for!(EctogenConfig);
    let catalog_schema = schema_for!(Vec<TableDef>);

    let config_path = out.join("config.schema.json");
    let catalog_path = out.join("catalog.schema.json");

    fs::write(
        &config_path,
        serde_json::to_string_pretty(&config_schema).context("serialize config schema")?,
    )
    .with_context(|| format!("write {}", config_path.display()))?;

    fs::write(
        &catalog_path,
        serde_json::to_string_pretty(&catalog_schema).context("serialize catalog schema")?,
    )
    .with_context(|| format!("write {}", catalog_path.display()))?;

    println!("Wrote schemas:");
    println!("  {}", config_path.display());
    println!("  {}", catalog_path.display());
    Ok(())
}
