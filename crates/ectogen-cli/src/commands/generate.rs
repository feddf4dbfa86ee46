use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use ectogen_config::EctogenConfig;
use ectogen_core::{MapOptions, TableDef, classify_table};
use ectogen_exporter::{render_schema, schema_path};
use tokio::fs;

use crate::options::{NamingArgs, SourceArgs, map_options, resolve_sources, table_filter};
use crate::utils::load_config;

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub naming: NamingArgs,
    /// Directory holding the generated `models` folder (default: lib/<app>).
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// Print the generated schemas instead of writing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// A rendered schema and where it goes.
struct Rendered {
    table: String,
    path: PathBuf,
    code: String,
}

pub async fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.source.config.as_deref())?;
    let config = args.naming.apply(args.source.apply(config));
    let filter = table_filter(&config)?;
    let options = map_options(&config);
    let models_dir = resolve_models_dir(args.out_dir.as_deref(), &config);
    let sources = resolve_sources(&args.source, &config)?;

    for source in &sources {
        tracing::info!(source = %source.name(), "reading catalog");
        let tables = source.read_tables(&filter).await?;
        if tables.is_empty() {
            tracing::warn!(source = %source.name(), "no tables matched");
            continue;
        }

        let rendered = render_tables(&tables, &options, &models_dir);
        if args.dry_run {
            for schema in &rendered {
                println!("{} {}", "#".bright_black(), schema.path.display());
                print!("{}", schema.code);
            }
        } else {
            write_all(&rendered).await?;
        }
    }

    Ok(())
}

fn resolve_models_dir(out_dir: Option<&Path>, config: &EctogenConfig) -> PathBuf {
    match out_dir {
        Some(dir) => dir.join("models"),
        None => config.models_dir(),
    }
}

fn render_tables(tables: &[TableDef], options: &MapOptions, models_dir: &Path) -> Vec<Rendered> {
    tables
        .iter()
        .map(|table| {
            let schema = classify_table(table, options);
            Rendered {
                table: table.name.clone(),
                path: schema_path(models_dir, &schema),
                code: render_schema(&schema),
            }
        })
        .collect()
}

/// Write files one at a time in listing order; a later table sharing a
/// path replaces the earlier file.
async fn write_all(rendered: &[Rendered]) -> Result<()> {
    for schema in rendered {
        if let Some(parent) = schema.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        fs::write(&schema.path, &schema.code)
            .await
            .with_context(|| format!("write {}", schema.path.display()))?;
        println!(
            "{} {} -> {}",
            "Generated".bright_green(),
            schema.table,
            schema.path.display()
        );
    }
    Ok(())
}
