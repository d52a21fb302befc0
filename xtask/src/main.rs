// Tooling crate: unwrap/expect/panic acceptable outside embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod gen_board;
mod test;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Soul board-support development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board mapping module from a TOML board description
    GenBoard {
        /// Board description file (e.g. boards/evt2.toml)
        input: std::path::PathBuf,
        /// Output file (default: crates/soul-board/src/boards/<name>.rs)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Fail if the output file differs from what would be generated
        #[arg(long)]
        check: bool,
    },
    /// Check the board-support crates build for the embedded target and the host
    Check,
    /// Run all tests (unit, integration, and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
}

fn main() -> Result<()> {
    // RUST_LOG=debug shows generator internals; status lines go to stdout regardless.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenBoard {
            input,
            output,
            check,
        } => gen_board::run(&input, output.as_deref(), check),
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
    }
}
