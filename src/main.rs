//! `roach` — reconcile BGP, IRR and RPKI origin data per prefix.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging ([`logger`]).
//! 2. Load config ([`config::load_config`]) and build the data source client ([`registry`]).
//! 3. Dispatch:
//!    - no subcommand: interactive session ([`interactive`]);
//!    - `query`: one lookup ([`lookup`]), rendered by [`report::terminal`] or [`report::json`];
//!    - `batch`: validate ([`input`]), fetch, extract ([`origin`]), write CSV ([`batch`]).
//! 4. Exit `0` on success, `1` on a rejected or failed batch or a failed query.

mod batch;
mod cli;
mod config;
mod input;
mod interactive;
mod logger;
mod lookup;
mod models;
mod origin;
mod registry;
mod report;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

use batch::{process_batch_file, BatchSettings};
use cli::{Cli, Command, OutputFormat};
use config::{load_config, Config};
use logger::{init_logger, ConsoleReporter};
use registry::irrexplorer::IrrExplorerClient;
use report::terminal::IrrPalette;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet || cli.command.is_none() {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    init_logger(level);

    let working_dir = std::env::current_dir()?;
    let mut config = load_config(&working_dir, cli.config.as_deref())?;
    if let Some(secs) = cli.timeout_secs {
        config.api.timeout_secs = secs;
    }

    let client = IrrExplorerClient::new(&config.api)?;

    match cli.command {
        None => interactive::run(&client, config.api.slow_hint()).await?,
        Some(Command::Query { identifier, format }) => {
            run_query(&client, &identifier, format).await?;
        }
        Some(Command::Batch {
            input,
            output,
            delay_ms,
        }) => {
            if let Some(ms) = delay_ms {
                config.batch.delay_ms = ms;
            }
            run_batch(&client, &config, &input, &output, cli.quiet).await;
        }
    }

    Ok(())
}

async fn run_query(client: &IrrExplorerClient, identifier: &str, format: OutputFormat) -> Result<()> {
    let records = match lookup::lookup(client, identifier).await {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    };

    match format {
        OutputFormat::Terminal => {
            report::terminal::render_results(&records, &mut IrrPalette::default());
        }
        OutputFormat::Json => println!("{}", report::json::render(&records)?),
    }

    Ok(())
}

async fn run_batch(client: &IrrExplorerClient, config: &Config, input: &Path, output: &Path, quiet: bool) {
    let settings = BatchSettings::from(&config.batch);
    let reporter = ConsoleReporter::new(0, quiet);

    let result = process_batch_file(input, output, client, &settings, &reporter).await;
    reporter.finish();

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("{} Batch processing failed: {}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}
