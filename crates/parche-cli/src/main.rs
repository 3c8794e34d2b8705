//! Parche CLI - apply patch streams to a headless audio graph.
//!
//! A development tool for the engine: feed it a JSON Lines patch stream and
//! it applies every patch against a tracing backend, then prints the
//! resulting graph snapshot. No audio is rendered.

mod commands;
mod trace_backend;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parche")]
#[command(author, version, about = "Parche patch-engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a JSON Lines patch stream and print the resulting graph
    Apply(commands::apply::ApplyArgs),

    /// List supported node kinds and their control parameters
    Kinds(commands::kinds::KindsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Kinds(args) => commands::kinds::run(args),
    }
}
