//! schedbot binary
//!
//! `schedbot <agent> <fetch|test|post|weather>`, run from a scheduler.

use clap::Parser;
use schedbot::logging::init_logging;
use schedbot::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.config.as_deref(), cli.data_dir.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let mut logging = context.config().logging.clone();
    cli.apply_logging_overrides(&mut logging);
    if let Err(e) = init_logging(&logging, cli.log_file.clone()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    match context.execute(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            tracing::error!(agent = %cli.agent, action = %cli.action, error = %e, "Action failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
