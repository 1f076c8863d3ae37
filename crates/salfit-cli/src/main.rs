//! Salfit CLI - Fit salary curves from the command line.

use clap::Parser;
use salfit_cli::commands;
use salfit_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing (log to stderr)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> salfit_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // An explicit config file must load; a broken default one falls back to defaults
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_init().unwrap_or_else(|e| {
            tracing::warn!("Ignoring configuration: {}", e);
            Config::default()
        }),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Fit(args) => {
            commands::execute_fit(args, &config, &formatter).await?;
        }
        Command::Evaluate(args) => {
            commands::execute_evaluate(args, &config, &formatter)?;
        }
        Command::Baseline(args) => {
            commands::execute_baseline(args, &config, &formatter).await?;
        }
        Command::Reference(args) => {
            commands::execute_reference(args, &config, &formatter)?;
        }
    }

    Ok(())
}
