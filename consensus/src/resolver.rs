//! Double-spend resolver — oldest-wins replay of a confirmation chain.
//!
//! The traversal only stops a validator from accepting a tip while both
//! sides of a conflict are visible and unvalidated. Alternatives accepted
//! through different tips (possibly in different rounds) both end up valid;
//! this pass demotes every alternative except the first one the replay
//! reaches.

use crate::chain::ConfirmationChain;
use std::collections::{HashMap, HashSet};
use tangle_ledger::TransactionGraph;
use tangle_types::{ConflictId, TxId};

/// A losing alternative found during replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Revocation {
    pub conflict: ConflictId,
    /// First alternative reached; keeps its vote.
    pub winner: TxId,
    /// Later alternative; its vote is cleared.
    pub loser: TxId,
    /// Whether the loser's flag was set before this pass.
    pub cleared: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub revocations: Vec<Revocation>,
}

impl ResolveOutcome {
    /// Revocations that actually flipped a flag.
    pub fn cleared(&self) -> impl Iterator<Item = &Revocation> {
        self.revocations.iter().filter(|r| r.cleared)
    }
}

/// Replay `chain` from its first entry and clear `validator`'s flag on every
/// transaction whose conflict id was already bound to a different one.
///
/// Each entry's ancestry is walked depth-first, the entry's tip first and
/// `parent1` before `parent2`, each transaction at most once per replay.
/// Replaying the same chain again changes nothing.
pub fn resolve(graph: &TransactionGraph, chain: &ConfirmationChain, validator: usize) -> ResolveOutcome {
    let mut visited: HashSet<TxId> = HashSet::new();
    let mut bound: HashMap<ConflictId, TxId> = HashMap::new();
    let mut outcome = ResolveOutcome::default();

    for entry in chain.entries() {
        let mut stack = vec![entry.transaction];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(tx) = graph.get(id) else {
                continue;
            };

            let winner = *bound.entry(tx.conflict_id()).or_insert(id);
            if winner != id {
                let cleared = tx.revoke(validator);
                tracing::debug!(
                    validator,
                    conflict = %tx.conflict_id(),
                    %winner,
                    loser = %id,
                    cleared,
                    sequence = entry.sequence,
                    "double spend resolved, oldest wins"
                );
                outcome.revocations.push(Revocation {
                    conflict: tx.conflict_id(),
                    winner,
                    loser: id,
                    cleared,
                });
            }

            for parent in [tx.parent2(), tx.parent1()].into_iter().flatten() {
                if !visited.contains(&parent) {
                    stack.push(parent);
                }
            }
        }
    }

    outcome
}
