//! CLI for the native simulator engine.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::missing_docs_in_private_items
)]

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::Value;
use simbridge::NativeSimulator;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simbridge", version, about = "Drive the native simulator engine")]
struct Cli {
    #[command(flatten)]
    options: BridgeArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct BridgeArgs {
    /// Largest engine response accepted, in bytes.
    #[arg(long, global = true, default_value_t = simbridge::MAX_RESPONSE_LEN)]
    max_response_len: usize,

    /// Log raw request/response JSON (enable with RUST_LOG=simbridge=trace).
    #[arg(long, global = true)]
    trace_payloads: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Call any engine method and print the JSON result.
    Call {
        /// Method name, e.g. getLatestCheckpoint.
        method: String,
        /// Arguments as a JSON value.
        #[arg(long, default_value = "null")]
        args: String,
    },

    /// Print the latest checkpoint.
    Checkpoint {
        /// Create a new checkpoint first and print that one.
        #[arg(long)]
        create: bool,
    },

    /// Advance the simulated clock.
    AdvanceClock {
        /// Milliseconds to advance by.
        millis: u64,
    },

    /// Advance to the next epoch.
    AdvanceEpoch,

    /// Generate shell completion scripts.
    #[command(hide = true)]
    Completion {
        /// Target shell.
        shell: Shell,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "simbridge", &mut std::io::stdout());
        return Ok(());
    }

    let mut sim = open(&cli.options)?;
    let result = run(&sim, cli.command);
    sim.destroy();
    result
}

fn open(opts: &BridgeArgs) -> Result<NativeSimulator> {
    NativeSimulator::builder()
        .max_response_len(opts.max_response_len)
        .trace_payloads(opts.trace_payloads)
        .build()
        .context("failed to start simulator")
}

fn run(sim: &NativeSimulator, command: Command) -> Result<()> {
    match command {
        Command::Call { method, args } => {
            let args: Value = serde_json::from_str(&args).context("--args is not valid JSON")?;
            let data: Value = sim
                .call(&method, &args)
                .with_context(|| format!("{method} failed"))?;
            print_json(&data)
        }
        Command::Checkpoint { create } => {
            let checkpoint = if create {
                sim.create_checkpoint()?
            } else {
                sim.get_latest_checkpoint()?
            };
            tracing::info!(
                sequence = checkpoint.data.sequence_number,
                epoch = checkpoint.data.epoch,
                "checkpoint"
            );
            print_json(&checkpoint)
        }
        Command::AdvanceClock { millis } => {
            sim.advance_clock(Duration::from_millis(millis))?;
            Ok(())
        }
        Command::AdvanceEpoch => {
            sim.advance_epoch()?;
            Ok(())
        }
        Command::Completion { .. } => Ok(()),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
