//! Series Organizer CLI
//!
//! A command-line tool for renaming TV episodes into a canonical layout using AI.

use clap::Parser;
use series_organizer::cli::{
    args::{Cli, Commands},
    commands::{check, inspect, rename},
};
use series_organizer::models::config::{self, Config};
use series_organizer::preflight;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let mut config = config::load_config(cli.config.as_deref())?;

    // Run the appropriate command
    match cli.command {
        Commands::Rename {
            root,
            subfolder,
            strategy,
            check,
            dry_run,
            report,
        } => {
            if let Some(root) = root {
                config.root = root;
            }
            if let Some(subfolder) = subfolder {
                config.subfolder = Some(subfolder);
            }
            if let Some(strategy) = strategy {
                config.strategy = strategy.into();
            }
            if let Some(check) = check {
                config.check = check.into();
            }

            if !cli.skip_preflight {
                run_preflight_checks(&config, Some(&config.scope())).await?;
            }
            rename::rename(&config, dry_run, report.as_deref()).await?;
        }

        Commands::Check { dir, check: strategy } => {
            if let Some(strategy) = strategy {
                config.check = strategy.into();
            }
            if !cli.skip_preflight {
                run_preflight_checks(&config, Some(&dir)).await?;
            }
            check::check(&config, &dir).await?;
        }

        Commands::Inspect { path } => {
            if !cli.skip_preflight {
                run_preflight_checks(&config, None).await?;
            }
            inspect::inspect(&config, &path).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("series_organizer=debug")
    } else {
        EnvFilter::new("series_organizer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config, library: Option<&Path>) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config, library).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
