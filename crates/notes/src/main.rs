//! Notes CLI - documentation browser for a fixed set of markdown notes.
//!
//! Provides commands for:
//! - `serve`: Start the notes server
//! - `build`: Export a static site
//! - `check`: Compare the registry with the notes directory

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, ServeArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Notes - browse a curated set of markdown notes.
#[derive(Parser)]
#[command(name = "notes", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the notes server.
    Serve(ServeArgs),
    /// Build a static site.
    Build(BuildArgs),
    /// Check the registry against the notes directory.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Serve(args) => args.verbose,
            Self::Build(args) => args.verbose,
            Self::Check(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(VERSION)),
            Err(e) => Err(e.into()),
        },
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
