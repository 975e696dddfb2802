//! SonataExtra - asset aggregation CLI
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use sonata_extra::cli::{Cli, Commands};
use sonata_extra::config::{Config, ConfigManager};
use sonata_extra::error::SonataResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> SonataResult<()> {
    let cli = Cli::parse();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let mut config = config_manager.load().await?;
    init_logging(cli.verbose, &config);

    if let Some(env) = cli.env {
        debug!("Environment overridden to {}", env);
        config.general.environment = env;
    }

    match cli.command {
        Commands::Render(args) => sonata_extra::cli::commands::render(args, &config).await,
        Commands::Cache(args) => sonata_extra::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            sonata_extra::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; logs go to stderr so rendered HTML stays clean
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("sonata_extra=warn"),
        1 => EnvFilter::new("sonata_extra=info"),
        _ => EnvFilter::new("sonata_extra=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
