use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use ectogen_core::TableDef;

use crate::options::{SourceArgs, resolve_sources, table_filter};
use crate::utils::load_config;

#[derive(Args, Debug, Clone, Default)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Write the snapshot to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Dump the filtered catalog as a JSON snapshot usable with `generate --catalog`.
pub async fn cmd_inspect(args: InspectArgs) -> Result<()> {
    let config = args.source.apply(load_config(args.source.config.as_deref())?);
    let filter = table_filter(&config)?;

    let mut tables: Vec<TableDef> = Vec::new();
    for source in resolve_sources(&args.source, &config)? {
        tables.extend(source.read_tables(&filter).await?);
    }

    let json = serde_json::to_string_pretty(&tables).context("serialize catalog snapshot")?;
    match &args.out {
        Some(path) => {
            tokio::fs::write(path, format!("{json}\n"))
                .await
                .with_context(|| format!("write {}", path.display()))?;
            println!(
                "{} {} tables -> {}",
                "Saved".bright_green(),
                tables.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
