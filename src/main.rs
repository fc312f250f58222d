//! rowexpr - validate and evaluate serialized scalar expressions

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use log::info;
use rowexpr::conversion::Reinterpreter;
use rowexpr::plan::load_request;
use std::path::PathBuf;

/// rowexpr - scalar expression evaluation for row-oriented executors
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an expression plan and evaluate it for each row of the request
    Eval {
        /// JSON request file with the expression, rows and local slots
        request: PathBuf,

        /// Pretty-print each result
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the standard reinterpretation conversions in priority order
    Conversions,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let registry = Reinterpreter::standard();

    match args.command {
        Command::Eval { request, pretty } => {
            let request = load_request(&request)?;
            let results = request
                .evaluate(&registry)
                .context("Failed to evaluate expression")?;

            for result in &results {
                let line = if pretty {
                    serde_json::to_string_pretty(result)?
                } else {
                    serde_json::to_string(result)?
                };
                println!("{}", line);
            }
            info!("evaluated {} rows", results.len());
        }
        Command::Conversions => {
            for (priority, conversion) in registry.conversions().iter().enumerate() {
                println!("{:>2}. {}", priority + 1, conversion);
            }
        }
    }

    Ok(())
}
