//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Beacon - a source path lookup engine for debuggers
#[derive(Parser)]
#[command(name = "beacon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Lookup configuration file
    #[arg(short, long, global = true, default_value = "beacon.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a debugger-reported file name to local source files
    Resolve(ResolveArgs),

    /// Translate a local path back to the backend's path
    Translate(TranslateArgs),

    /// Show the configured source containers
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// File name or path as the debugger reports it
    pub name: String,

    /// Collect every match instead of stopping at the first
    #[arg(long)]
    pub all: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct TranslateArgs {
    /// Local source file path
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
