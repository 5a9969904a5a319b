//! Validator confirmation engine.
//!
//! A validator evaluates the current tips one by one. A tip whose unvalidated
//! ancestry holds no unresolved conflict is appended to the validator's chain
//! and its whole ancestry is marked valid for that validator. Other tips are
//! deferred to a later round.

use crate::chain::ConfirmationChain;
use crate::error::ConsensusError;
use crate::resolver::{self, ResolveOutcome};
use crate::traversal;
use std::collections::HashSet;
use tangle_ledger::TransactionGraph;
use tangle_types::{ProtocolParams, TxId};

/// What one round did for one validator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Tips appended to the chain, in processing order.
    pub accepted: Vec<TxId>,
    /// Tips skipped because of an unresolved conflict.
    pub deferred: Vec<TxId>,
    /// Validity flags that flipped from unset to set.
    pub newly_valid: usize,
}

/// One voter: its index into every transaction's validity flags and its
/// private confirmation chain.
#[derive(Clone, Debug)]
pub struct Validator {
    index: usize,
    chain: ConfirmationChain,
}

impl Validator {
    pub fn new(index: usize, params: &ProtocolParams) -> Result<Self, ConsensusError> {
        let validators = params.validators();
        if index >= validators {
            return Err(ConsensusError::ValidatorOutOfRange { index, validators });
        }
        Ok(Self {
            index,
            chain: ConfirmationChain::new(),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn chain(&self) -> &ConfirmationChain {
        &self.chain
    }

    /// Evaluate `tips` in order. Repeatable as the graph grows.
    pub fn run_round(&mut self, graph: &TransactionGraph, tips: &[TxId]) -> RoundOutcome {
        run_validator(graph, tips, &mut self.chain, self.index)
    }

    /// Replay the chain and revoke double-spend losers.
    pub fn resolve(&self, graph: &TransactionGraph) -> ResolveOutcome {
        resolver::resolve(graph, &self.chain, self.index)
    }
}

/// Evaluate `tips` for `validator`, appending accepted tips to `chain`.
pub fn run_validator(
    graph: &TransactionGraph,
    tips: &[TxId],
    chain: &mut ConfirmationChain,
    validator: usize,
) -> RoundOutcome {
    let mut outcome = RoundOutcome::default();

    for &tip in tips {
        if !graph.contains(tip) {
            tracing::warn!(validator, %tip, "tip not in graph, skipping");
            continue;
        }
        if let Some(conflict) = traversal::find_unresolved_conflict(graph, tip, validator) {
            tracing::debug!(
                validator,
                %tip,
                conflict = %conflict.conflict,
                first = %conflict.first,
                second = %conflict.second,
                "unresolved double spend, deferring tip"
            );
            outcome.deferred.push(tip);
            continue;
        }

        let entry = match chain.append(tip) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(validator, %tip, %err, "cannot record tip, deferring");
                outcome.deferred.push(tip);
                continue;
            }
        };
        outcome.newly_valid += confirm(graph, tip, validator);
        outcome.accepted.push(tip);
        tracing::trace!(validator, %tip, entry = entry.index(), "accepted tip");
    }

    outcome
}

/// Mark `tip` and its whole ancestry valid for `validator`.
///
/// Each transaction is visited once. Returns how many flags were newly set.
pub fn confirm(graph: &TransactionGraph, tip: TxId, validator: usize) -> usize {
    let mut visited: HashSet<TxId> = HashSet::new();
    let mut stack = vec![tip];
    let mut newly_valid = 0;

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(tx) = graph.get(id) else {
            continue;
        };
        if tx.mark_valid(validator) {
            newly_valid += 1;
        }
        stack.extend(tx.parents().filter(|p| !visited.contains(p)));
    }
    newly_valid
}
