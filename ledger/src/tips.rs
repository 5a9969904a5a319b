//! Tip selection — the current frontier of the tangle.

use crate::graph::TransactionGraph;
use tangle_types::TxId;

/// Transactions that no other transaction references as a parent.
///
/// One pass marks every referenced transaction; the unmarked remainder is
/// returned in creation order, so repeated calls on the same graph yield the
/// same sequence.
pub fn compute_tips(graph: &TransactionGraph) -> Vec<TxId> {
    let mut referenced = vec![false; graph.len()];
    for tx in graph.iter() {
        for parent in tx.parents() {
            if let Some(slot) = referenced.get_mut(parent.index()) {
                *slot = true;
            }
        }
    }
    graph
        .ids()
        .filter(|id| !referenced[id.index()])
        .collect()
}

impl TransactionGraph {
    pub fn tips(&self) -> Vec<TxId> {
        compute_tips(self)
    }
}
