//! flint-branch - expand module templates of a compiled model database

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flint_branch::BranchConfig;

#[derive(Parser, Debug)]
#[command(name = "flint-branch")]
#[command(about = "Expand module templates of a compiled model database")]
struct Args {
    /// Path to the model database
    #[arg(long, env = "FLINT_DATABASE_PATH", default_value = "./model.db")]
    database: PathBuf,

    /// Path of the model file the database was compiled from
    #[arg(long, env = "FLINT_MODEL_PATH", default_value = ".")]
    model_path: PathBuf,

    /// Log level
    #[arg(long, env = "FLINT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Run the whole pass in one transaction (nothing is written on failure)
    #[arg(long, env = "FLINT_ATOMIC")]
    atomic: bool,

    /// Print pass statistics as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = BranchConfig {
        database_path: args.database,
        model_path: args.model_path,
        log_level: args.log_level,
        atomic: args.atomic,
    };
    config.validate()?;

    tracing::info!("Starting flint-branch v{}", env!("CARGO_PKG_VERSION"));

    let stats = flint_branch::run(&config)
        .map_err(|e| {
            tracing::error!(code = e.error_code(), "{}", e);
            e
        })
        .with_context(|| format!("branch pass failed on {}", config.database_path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}
