//! Game balance simulator CLI.
//!
//! Plays many campaigns on autopilot and prints a balance report.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 1000 runs, every class
//!   cargo run --bin simulate -- -n 200 --hero bard    # 200 Bard runs
//!   cargo run --bin simulate -- --seed 42 --json      # Reproducible, saves JSON

use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;
use upside_down::build_info;
use upside_down::character::HeroClass;
use upside_down::simulator::{run_simulation, Policy, SimConfig};

/// Upside Down balance simulator
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(version, about = "Monte Carlo balance runs for the Upside Down", long_about = None)]
struct Args {
    /// Number of campaigns to play
    #[arg(short = 'n', long = "runs", default_value_t = 1000)]
    runs: u32,

    /// Random seed for reproducibility (run i uses seed + i)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Play every run with this class instead of rotating the roster
    #[arg(long = "hero")]
    hero: Option<HeroClass>,

    /// Autopilot strategy: tactical or attack-only
    #[arg(short = 'p', long = "policy", default_value = "tactical")]
    policy: Policy,

    /// Abandon campaigns still running after this many turns
    #[arg(long = "max-turns", default_value_t = 10_000)]
    max_turns: u32,

    /// Also write the report as JSON to a timestamped file
    #[arg(long = "json")]
    json: bool,

    /// Log every finished run
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn to_config(&self) -> SimConfig {
        SimConfig {
            num_runs: self.runs,
            seed: self.seed,
            hero: self.hero,
            policy: self.policy,
            max_turns_per_run: self.max_turns,
            verbosity: if self.verbose { 2 } else { 1 },
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = args.to_config();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              UPSIDE DOWN BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    match config.hero {
        Some(hero) => println!("  Hero:           {}", hero),
        None => println!("  Hero:           rotating roster"),
    }
    println!("  Policy:         {}", config.policy);
    println!("  Max Turns:      {}", config.max_turns_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!("  Build:          {}", build_info::version_line());
    println!();

    info!(runs = config.num_runs, "running simulation");
    let report = run_simulation(&config).map_err(io::Error::other)?;

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}
