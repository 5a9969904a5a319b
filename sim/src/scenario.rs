//! Scenario fixtures — seed a graph, drive validator rounds, sweep quorum.
//!
//! Every scenario starts from the two roots. "Split" scenarios let the first
//! half of the validators vote, grow the graph, then let the second half vote
//! on the newer tips, so the two halves see different graphs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use tangle_consensus::{evaluate_quorum, QuorumReport, ValidatorRound, ValidatorSet};
use tangle_ledger::TransactionGraph;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::growth::GraphGrower;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Four transactions, every validator votes on the same tips.
    #[default]
    Basic,
    /// Validators split across two growth phases, no double spend.
    Split,
    /// Five transactions and a double spend, every validator votes.
    DoubleSpend,
    /// Double spend with validators split across growth phases, the first
    /// half catching up at the end.
    SplitDoubleSpend,
}

/// Everything a finished scenario leaves behind.
pub struct Run {
    pub scenario: Scenario,
    pub seed: u64,
    pub graph: TransactionGraph,
    pub validators: ValidatorSet,
    pub rounds: Vec<ValidatorRound>,
    pub quorum: QuorumReport,
}

/// Drives validator rounds, sequentially or on the rayon pool.
struct Driver {
    validators: ValidatorSet,
    rounds: Vec<ValidatorRound>,
    parallel: bool,
}

impl Driver {
    fn round(&mut self, graph: &TransactionGraph, range: Range<usize>) {
        let tips = graph.tips();
        tracing::info!(tips = tips.len(), ?range, "starting validator round");
        let rounds = if self.parallel {
            self.validators.run_round_parallel(graph, &tips, range)
        } else {
            self.validators.run_round(graph, &tips, range)
        };
        self.rounds.extend(rounds);
    }
}

pub fn run(config: &SimConfig) -> Result<Run, SimError> {
    config.validate()?;
    let params = config.params();
    let mut graph = TransactionGraph::new(params);
    let mut grower = GraphGrower::new(config.seed);
    let mut driver = Driver {
        validators: ValidatorSet::new(&params)?,
        rounds: Vec::new(),
        parallel: config.parallel,
    };
    let all = 0..params.validators();
    let split = params.validators() / 2;

    tracing::info!(
        scenario = ?config.scenario,
        seed = config.seed,
        validators = params.validators(),
        quorum = params.quorum(),
        "running scenario"
    );

    match config.scenario {
        Scenario::Basic => {
            grower.grow(&mut graph, 4)?;
            driver.round(&graph, all);
        }
        Scenario::Split => {
            grower.grow(&mut graph, 3)?;
            driver.round(&graph, 0..split);
            grower.grow(&mut graph, 3)?;
            driver.round(&graph, split..params.validators());
        }
        Scenario::DoubleSpend => {
            grower.grow(&mut graph, 5)?;
            grower.insert_double_spend(&mut graph)?;
            driver.round(&graph, all);
        }
        Scenario::SplitDoubleSpend => {
            grower.grow(&mut graph, 6)?;
            grower.insert_double_spend(&mut graph)?;
            driver.round(&graph, 0..split);
            grower.grow(&mut graph, 4)?;
            driver.round(&graph, split..params.validators());
            driver.round(&graph, 0..split);
        }
    }

    let quorum = evaluate_quorum(&mut graph);
    Ok(Run {
        scenario: config.scenario,
        seed: config.seed,
        graph,
        validators: driver.validators,
        rounds: driver.rounds,
        quorum,
    })
}
