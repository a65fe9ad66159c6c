//! Development tasks for the agent decision engine.
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`
//!
//! Logging follows `RUST_LOG` (e.g. `RUST_LOG=game_core=debug`).

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{CheckContent, ReadSnapshot, Simulate};

/// Development tasks for the agent decision engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for agent AI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read and inspect an agent snapshot file
    ReadSnapshot(ReadSnapshot),

    /// Run one agent against a scripted approaching enemy
    Simulate(Simulate),

    /// Load and validate a content directory
    CheckContent(CheckContent),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ReadSnapshot(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
        Command::CheckContent(cmd) => cmd.execute(),
    }
}
