//! Seeded random growth of a tangle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tangle_ledger::{LedgerError, TransactionGraph};
use tangle_types::{ConflictId, TxId};

/// Appends random transactions and double spends to a graph.
///
/// Driven by a seeded `StdRng`: the same seed on the same graph always
/// produces the same growth.
pub struct GraphGrower {
    rng: StdRng,
}

impl GraphGrower {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Append `count` transactions, each referencing two distinct existing ones.
    pub fn grow(&mut self, graph: &mut TransactionGraph, count: usize) -> Result<Vec<TxId>, LedgerError> {
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let (parent1, parent2) = self.distinct_pair(graph)?;
            created.push(graph.create_transaction(parent1, parent2)?);
        }
        Ok(created)
    }

    /// Append a double spend of a random non-root, non-conflicting transaction.
    pub fn insert_double_spend(&mut self, graph: &mut TransactionGraph) -> Result<TxId, LedgerError> {
        let originals: Vec<ConflictId> = graph
            .iter()
            .filter(|tx| !tx.id().is_root() && !tx.is_conflicting())
            .map(|tx| tx.conflict_id())
            .collect();
        if originals.is_empty() {
            return Err(LedgerError::InsufficientTransactions {
                needed: 3,
                have: graph.len(),
            });
        }
        let conflict = originals[self.rng.gen_range(0..originals.len())];
        let (parent1, parent2) = self.distinct_pair(graph)?;
        let id = graph.create_conflicting_transaction(conflict, parent1, parent2)?;
        tracing::info!(tx = %id, %conflict, %parent1, %parent2, "inserted double spend");
        Ok(id)
    }

    fn distinct_pair(&mut self, graph: &TransactionGraph) -> Result<(TxId, TxId), LedgerError> {
        let len = graph.len();
        if len < 2 {
            return Err(LedgerError::InsufficientTransactions { needed: 2, have: len });
        }
        let first = self.rng.gen_range(0..len);
        let mut second = self.rng.gen_range(0..len - 1);
        if second >= first {
            second += 1;
        }
        Ok((TxId::new(first as u32), TxId::new(second as u32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_appends_transactions_with_distinct_parents() {
        let mut graph = TransactionGraph::default();
        let created = GraphGrower::new(1).grow(&mut graph, 10).unwrap();

        assert_eq!(created.len(), 10);
        assert_eq!(graph.len(), 12);
        for id in created {
            let tx = graph.get(id).unwrap();
            assert_ne!(tx.parent1(), tx.parent2());
            assert!(tx.parents().all(|p| p < id));
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let shape = |seed| {
            let mut graph = TransactionGraph::default();
            let mut grower = GraphGrower::new(seed);
            grower.grow(&mut graph, 8).unwrap();
            grower.insert_double_spend(&mut graph).unwrap();
            graph
                .iter()
                .map(|tx| (tx.parent1(), tx.parent2(), tx.conflict_id()))
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(9), shape(9));
    }

    #[test]
    fn double_spend_needs_a_non_root_target() {
        let mut graph = TransactionGraph::default();
        let err = GraphGrower::new(1).insert_double_spend(&mut graph).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientTransactions { needed: 3, have: 2 });
    }

    #[test]
    fn double_spend_targets_an_original() {
        let mut graph = TransactionGraph::default();
        let mut grower = GraphGrower::new(3);
        grower.grow(&mut graph, 5).unwrap();
        let ds = grower.insert_double_spend(&mut graph).unwrap();

        let tx = graph.get(ds).unwrap();
        assert!(tx.is_conflicting());
        let origin = tx.conflict_id().origin().unwrap();
        assert!(!origin.is_root());
        assert!(!graph.get(origin).unwrap().is_conflicting());
    }
}
