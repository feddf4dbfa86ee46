use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod options;
mod utils;
use commands::{GenerateArgs, InspectArgs, cmd_generate, cmd_init, cmd_inspect, cmd_schema};

/// ectogen command-line interface.
#[derive(Parser, Debug)]
#[command(name = "ectogen", author, version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize ectogen.json with defaults.
    Init,
    /// Generate Ecto schema modules from database tables.
    Generate(GenerateArgs),
    /// Print the catalog as a JSON snapshot.
    Inspect(InspectArgs),
    /// Write JSON Schemas for the config file and catalog snapshots.
    Schema {
        /// Output directory for schema files.
        #[arg(short = 'o', long = "out", default_value = "schemas")]
        out: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_tracing(cli.verbose);
    match cli.command {
        Commands::Init => cmd_init(),
        Commands::Generate(args) => cmd_generate(args).await,
        Commands::Inspect(args) => cmd_inspect(args).await,
        Commands::Schema { out } => cmd_schema(&out),
    }
}
