//! SSBMax CLI - Command-line interface for OLQ scoring and dashboards.

use clap::Parser;
use ssbmax_cli::commands;
use ssbmax_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Initialize tracing (log to stderr so stdout stays machine-readable)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run() -> ssbmax_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config (defaults when the file is missing)
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;

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
        Command::Dashboard(args) => commands::execute_dashboard(args, &config, &formatter)?,
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter)?,
        Command::Rules(args) => commands::execute_rules(args, &formatter)?,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?
        }
    }

    Ok(())
}
