//! Tangle simulator — runs a confirmation scenario and renders the result.

mod config;
mod error;
mod growth;
mod render;
mod report;
mod scenario;

use clap::Parser;
use std::path::PathBuf;

use config::SimConfig;
use report::RunReport;
use scenario::Scenario;
use tangle_utils::LogFormat;

#[derive(Parser)]
#[command(name = "tangle-sim", about = "Tangle confirmation simulator")]
struct Cli {
    /// Scenario to run.
    #[arg(value_enum)]
    scenario: Option<Scenario>,

    /// Seed for graph growth.
    #[arg(long, env = "TANGLE_SEED")]
    seed: Option<u64>,

    /// Seed graph growth from entropy instead of a fixed seed.
    #[arg(long, conflicts_with = "seed")]
    random: bool,

    /// Byzantine fault tolerance (validators = 3f + 1).
    #[arg(long, env = "TANGLE_BFT")]
    bft: Option<usize>,

    /// Run each round's validators in parallel.
    #[arg(long, env = "TANGLE_PARALLEL")]
    parallel: bool,

    /// Graphviz output path.
    #[arg(long, env = "TANGLE_DOT")]
    dot: Option<PathBuf>,

    /// Skip the Graphviz output.
    #[arg(long, conflicts_with = "dot")]
    no_dot: bool,

    /// JSON report output path.
    #[arg(long, env = "TANGLE_REPORT")]
    report: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TANGLE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TANGLE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn into_config(self, base: SimConfig) -> SimConfig {
        let seed = if self.random {
            rand::random()
        } else {
            self.seed.unwrap_or(base.seed)
        };
        let dot_output = if self.no_dot {
            None
        } else {
            self.dot.or(base.dot_output)
        };
        SimConfig {
            byzantine_fault_tolerance: self.bft.unwrap_or(base.byzantine_fault_tolerance),
            scenario: self.scenario.unwrap_or(base.scenario),
            seed,
            parallel: self.parallel || base.parallel,
            dot_output,
            report_output: self.report.or(base.report_output),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.unwrap_or(base.log_level),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    let base = match cli.config.take() {
        Some(path) => SimConfig::from_toml_file(&path)?,
        None => SimConfig::default(),
    };
    let print_config = cli.print_config;
    let config = cli.into_config(base);
    config.validate()?;
    if print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    tangle_utils::init_logging(config.log_format, &config.log_level);

    let run = scenario::run(&config)?;
    for tx in run.graph.iter() {
        tracing::debug!(
            tx = %tx.id(),
            conflict = %tx.conflict_id(),
            parents = ?tx.parents().collect::<Vec<_>>(),
            valid_by = ?tx.valid_by(),
            confirmed = tx.is_confirmed(),
            "transaction"
        );
    }
    tracing::info!(
        scenario = ?run.scenario,
        seed = run.seed,
        transactions = run.graph.len(),
        confirmed = run.quorum.confirmed,
        deferred = run.rounds.iter().map(|r| r.round.deferred.len()).sum::<usize>(),
        revoked = run.rounds.iter().map(|r| r.resolution.cleared().count()).sum::<usize>(),
        "scenario finished"
    );

    if let Some(path) = &config.dot_output {
        std::fs::write(path, render::render_dot(&run.graph, &run.validators))?;
        tracing::info!("wrote graph to {}", path.display());
    }
    if let Some(path) = &config.report_output {
        RunReport::from_run(&run).write(path)?;
        tracing::info!("wrote report to {}", path.display());
    }

    Ok(())
}
