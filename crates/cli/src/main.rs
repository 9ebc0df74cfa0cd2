//! Cache simulator CLI.
//!
//! This binary replays an address trace against several cache organizations:
//! 1. **Run:** Read a hexadecimal trace and print hits and hit rate per cache.
//! 2. **Config:** Print the built-in configuration as JSON, a starting point for `--config`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::{SimError, TraceError};
use cachesim_core::config::{ReplacementPolicy, SimConfig};
use cachesim_core::sim::{SimulationRunner, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a trace of hexadecimal byte addresses against direct-mapped, set-associative and fully associative caches.\n\nWithout --config the classic 32-byte cache with 4-byte blocks is simulated as direct-mapped, 2-way, 4-way and fully associative.\n\nExamples:\n  cachesim run\n  cachesim run -t traces.txt --policy random --seed 42\n  cachesim config > caches.json && cachesim run -c caches.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and print per-cache statistics.
    Run {
        /// Trace file of whitespace-separated hexadecimal addresses.
        #[arg(short, long, default_value = "traces.txt")]
        trace: PathBuf,

        /// JSON file listing the caches to simulate.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Replacement policy for every cache (lru or random).
        #[arg(long)]
        policy: Option<ReplacementPolicy>,

        /// Seed for the random policy; omitted means a fresh seed per run.
        #[arg(long)]
        seed: Option<u64>,

        /// Simulate each cache on its own thread.
        #[arg(long)]
        parallel: bool,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as JSON.
    Config,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            trace,
            config,
            policy,
            seed,
            parallel,
            json,
        } => cmd_run(&trace, config, policy, seed, parallel, json),
        Commands::Config => cmd_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the configuration, replays the trace, and prints the report.
fn cmd_run(
    trace: &Path,
    config: Option<PathBuf>,
    policy: Option<ReplacementPolicy>,
    seed: Option<u64>,
    parallel: bool,
    json: bool,
) -> Result<(), SimError> {
    let mut sim_config = match config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(policy) = policy {
        sim_config = sim_config.with_policy(policy);
    }
    if let Some(seed) = seed {
        sim_config = sim_config.with_seed(seed);
    }

    let mut runner = SimulationRunner::from_config(&sim_config)?;
    let reader = TraceReader::open(trace)?;
    info!(trace = %trace.display(), caches = sim_config.caches.len(), parallel, "starting simulation");

    if parallel {
        let addresses = reader.collect::<Result<Vec<u32>, TraceError>>()?;
        runner.run_parallel(&addresses);
    } else {
        runner.try_run(reader)?;
    }

    let report = runner.report();
    if json {
        println!("{}", report.to_json()?);
    } else {
        report.print();
    }
    Ok(())
}

/// Prints the built-in configuration.
fn cmd_config() -> Result<(), SimError> {
    println!("{}", SimConfig::default().to_json()?);
    Ok(())
}
