//! Trail CLI - breadcrumb renderer.
//!
//! Provides commands for:
//! - `render`: Render the breadcrumb of a page snapshot
//! - `fetch`: Query the menu-api service directly
//! - `nav`: Render the top navigation of a page snapshot

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FetchArgs, NavArgs, RenderArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Trail - breadcrumb renderer.
#[derive(Parser)]
#[command(name = "trail", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the breadcrumb of a page.
    Render(RenderArgs),
    /// Run one menu-api call and print the answer.
    Fetch(FetchArgs),
    /// Render the top navigation of a page.
    Nav(NavArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.service.verbose,
            Self::Fetch(args) => args.service.verbose,
            Self::Nav(args) => args.verbose,
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
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(VERSION),
        Commands::Fetch(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
