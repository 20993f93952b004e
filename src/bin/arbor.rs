//! Arbor CLI Binary
//!
//! Command-line interface for the hierarchical content store.

use arbor::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.root.clone(), cli.config.clone()) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error initializing store: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
