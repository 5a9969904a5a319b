//! Conflict-aware traversal — decides whether a validator may accept a tip.
//!
//! The walk goes backward from the tip through every ancestor the validator
//! has not yet marked valid. Anything already valid was conflict-checked when
//! it was accepted, so the walk never descends past it. Two unvalidated
//! ancestors carrying the same conflict id mean the validator cannot yet
//! tell which alternative should win, and the tip is deferred.

use std::collections::{HashMap, HashSet};
use tangle_ledger::TransactionGraph;
use tangle_types::{ConflictId, TxId};

/// Two unvalidated alternatives of one conflict found under a tip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnresolvedConflict {
    pub conflict: ConflictId,
    /// The alternative the walk reached first.
    pub first: TxId,
    /// The alternative that tripped the check.
    pub second: TxId,
}

/// Whether `validator` can accept `tip` this round. Pure: nothing is mutated.
pub fn can_accept(graph: &TransactionGraph, tip: TxId, validator: usize) -> bool {
    find_unresolved_conflict(graph, tip, validator).is_none()
}

/// The first unresolved conflict under `tip`, in depth-first order with
/// `parent1` explored before `parent2`.
pub fn find_unresolved_conflict(
    graph: &TransactionGraph,
    tip: TxId,
    validator: usize,
) -> Option<UnresolvedConflict> {
    let mut visited: HashSet<TxId> = HashSet::new();
    let mut seen: HashMap<ConflictId, TxId> = HashMap::new();
    let mut stack = vec![tip];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(tx) = graph.get(id) else {
            continue;
        };

        if !tx.is_valid_for(validator) {
            if let Some(&first) = seen.get(&tx.conflict_id()) {
                return Some(UnresolvedConflict {
                    conflict: tx.conflict_id(),
                    first,
                    second: id,
                });
            }
            seen.insert(tx.conflict_id(), id);
        }

        // parent2 is pushed first so parent1 is explored first.
        for parent in [tx.parent2(), tx.parent1()].into_iter().flatten() {
            let trusted = graph
                .get(parent)
                .is_some_and(|p| p.is_valid_for(validator));
            if !trusted && !visited.contains(&parent) {
                stack.push(parent);
            }
        }
    }
    None
}
