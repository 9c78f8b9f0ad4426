//! Beacon CLI - resolve debugger source paths from the command line

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("beacon=debug")
    } else {
        EnvFilter::new("beacon=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(&cli.config, args),
        Commands::Translate(args) => commands::translate::execute(&cli.config, args),
        Commands::List(args) => commands::list::execute(&cli.config, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
