mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{query, search, tags, Context};
use crate::error::{exit_code_for, report_error};
use sift_config as config;

#[derive(Debug, Parser)]
#[command(name = "sift", version, about = "Structured search over a music catalog")]
struct Cli {
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show how a query splits into tokens
    Tokenize(query::TokenizeArgs),
    /// Show the predicate a query compiles to
    Explain(query::ExplainArgs),
    /// List catalog tracks matching a query
    Search(search::SearchArgs),
    /// Show one track by id
    Show(search::ShowArgs),
    /// List tags with track counts
    Tags(tags::TagsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        catalog,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let ctx = Context {
        config: &app_config,
        json,
        catalog_path: catalog,
    };

    match command {
        Command::Tokenize(args) => query::tokenize(&ctx, args),
        Command::Explain(args) => query::explain(&ctx, args),
        Command::Search(args) => search::search(&ctx, args),
        Command::Show(args) => search::show_track(&ctx, args),
        Command::Tags(args) => tags::list_tags(&ctx, args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
