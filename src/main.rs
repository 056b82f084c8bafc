//! RUL2 Engine - Command Line Runner
//!
//! Loads override rules and a scenario, resolves the scenario's seed batch
//! against its grid and prints the outcome.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rul2_engine::core::config::EngineConfig;
use rul2_engine::core::error::{EngineError, Result};
use rul2_engine::engine::{ResolveError, ResolveStats, Resolver};
use rul2_engine::network::tile::SolvedCell;
use rul2_engine::rules::load_rule_files;
use rul2_engine::scenario::Scenario;

/// Resolve a batch of placed network tiles against RUL2 override rules
#[derive(Parser, Debug)]
#[command(name = "rul2")]
#[command(about = "Resolve network tile placements against RUL2 override rules")]
struct Args {
    /// RUL2 rule file; repeat to load several, later files win
    #[arg(long = "rules", required = true)]
    rules: Vec<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scenario with grid occupants and the seed batch (TOML)
    #[arg(long)]
    scenario: PathBuf,

    /// Refuse rule files with malformed lines instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    success: bool,
    rules: usize,
    skipped_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<ResolveStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ResolveError>,
    cells: Vec<SolvedCell>,
    /// Grid occupants after a successful commit
    committed: usize,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "rul2_engine=debug"
    } else {
        "rul2_engine=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether the batch resolved
fn run(args: &Args) -> Result<bool> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let (store, load) = load_rule_files(args.rules.as_slice())?;
    if args.strict {
        load.ensure_clean()?;
    }
    let scenario = Scenario::load(&args.scenario)?;
    let mut grid = scenario.grid()?;
    let seeds = scenario.seeds()?;

    let outcome = Resolver::new(&store, &config).resolve_onto(&mut grid, seeds);

    let report = match outcome {
        Ok(resolution) => RunReport {
            success: true,
            rules: store.len(),
            skipped_lines: load.skipped.iter().map(ToString::to_string).collect(),
            stats: Some(resolution.stats),
            error: None,
            cells: resolution.cells,
            committed: grid.occupants().count(),
        },
        Err(EngineError::Resolve(e)) => RunReport {
            success: false,
            rules: store.len(),
            skipped_lines: load.skipped.iter().map(ToString::to_string).collect(),
            stats: None,
            error: Some(e),
            cells: Vec::new(),
            committed: 0,
        },
        Err(e) => return Err(e),
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(&report),
        _ => {
            eprintln!("Unknown format '{}', defaulting to text", args.format);
            print_text(&report);
        }
    }

    Ok(report.success)
}

fn print_text(report: &RunReport) {
    println!("Rule store: {} entries", report.rules);
    for line in &report.skipped_lines {
        println!("Skipped {}", line);
    }
    if let Some(error) = &report.error {
        let kind = if error.is_veto() { "Vetoed" } else { "Aborted" };
        println!("{}: {}", kind, error);
        return;
    }
    if let Some(stats) = &report.stats {
        println!(
            "Resolved in {} passes: {} matches ({} bridged), budget {}",
            stats.passes, stats.matches, stats.bridged, stats.budget
        );
    }
    for cell in &report.cells {
        println!("  {}", cell);
    }
    println!("Grid now holds {} occupants", report.committed);
}
