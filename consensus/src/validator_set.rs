//! Validator set — every validator of a run and the round driver over them.
//!
//! Validators share nothing but the graph. Each one writes only its own
//! validity index and its own chain, so a round can run them on separate
//! rayon workers while the graph is borrowed immutably.

use crate::error::ConsensusError;
use crate::resolver::ResolveOutcome;
use crate::validator::{RoundOutcome, Validator};
use rayon::prelude::*;
use std::ops::Range;
use tangle_ledger::TransactionGraph;
use tangle_types::{ProtocolParams, TxId};

/// A validator's round followed by its resolver pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorRound {
    pub validator: usize,
    pub round: RoundOutcome,
    pub resolution: ResolveOutcome,
}

pub struct ValidatorSet {
    validators: Vec<Validator>,
}

impl ValidatorSet {
    /// One validator per index in `0..params.validators()`.
    pub fn new(params: &ProtocolParams) -> Result<Self, ConsensusError> {
        let validators = (0..params.validators())
            .map(|index| Validator::new(index, params))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { validators })
    }

    pub fn get(&self, index: usize) -> Option<&Validator> {
        self.validators.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Validator> {
        self.validators.iter()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator over `tips`, resolving after each.
    pub fn run_all(&mut self, graph: &TransactionGraph, tips: &[TxId]) -> Vec<ValidatorRound> {
        self.run_round(graph, tips, 0..self.validators.len())
    }

    /// Run the validators in `range` one after another over `tips`, each
    /// followed by its resolver pass. Out-of-range indices are clamped.
    pub fn run_round(
        &mut self,
        graph: &TransactionGraph,
        tips: &[TxId],
        range: Range<usize>,
    ) -> Vec<ValidatorRound> {
        let range = self.clamp(range);
        self.validators[range]
            .iter_mut()
            .map(|validator| round_for(validator, graph, tips))
            .collect()
    }

    /// Same as [`run_round`](Self::run_round), one rayon task per validator.
    /// Results are returned in validator order.
    pub fn run_round_parallel(
        &mut self,
        graph: &TransactionGraph,
        tips: &[TxId],
        range: Range<usize>,
    ) -> Vec<ValidatorRound> {
        let range = self.clamp(range);
        self.validators[range]
            .par_iter_mut()
            .map(|validator| round_for(validator, graph, tips))
            .collect()
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.validators.len());
        range.start.min(end)..end
    }
}

fn round_for(validator: &mut Validator, graph: &TransactionGraph, tips: &[TxId]) -> ValidatorRound {
    let round = validator.run_round(graph, tips);
    let resolution = validator.resolve(graph);
    tracing::info!(
        validator = validator.index(),
        accepted = round.accepted.len(),
        deferred = round.deferred.len(),
        revoked = resolution.cleared().count(),
        chain_len = validator.chain().len(),
        "validator round complete"
    );
    ValidatorRound {
        validator: validator.index(),
        round,
        resolution,
    }
}
