//! Optical lattice storage demo CLI.
//!
//! - `ols write` - encode a payload into a pattern JSON document
//! - `ols read` - decode a pattern JSON document back into bytes
//! - `ols simulate` - full write → noise → read round trip with a report

#![forbid(unsafe_code)]

mod options;
mod read;
mod simulate;
mod write;

use clap::{Parser, Subcommand};

/// Optical lattice storage simulator.
#[derive(Parser)]
#[command(name = "ols")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a payload into a storage pattern.
    ///
    /// Emits the pattern's JSON projection on stdout (or to a file), ready
    /// to be read back with `ols read`.
    ///
    /// Example: ols write "hello" --grid 8x8x2 --levels 4x4
    Write(write::WriteArgs),

    /// Decode a stored pattern back into its payload.
    ///
    /// Prints the recovered payload on stdout; correction diagnostics go
    /// to the log on stderr.
    ///
    /// Example: ols read pattern.json
    Read(read::ReadArgs),

    /// Write, optionally perturb, and read back in one run.
    ///
    /// Reports the correction counters and whether the payload survived.
    /// Exits nonzero when the round trip does not match.
    ///
    /// Example: ols simulate "hello" --intensity-noise 0.005 --seed 7
    Simulate(simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for payload/JSON output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Write(args) => write::run(args),
        Commands::Read(args) => read::run(args),
        Commands::Simulate(args) => simulate::run(args),
    }
}
