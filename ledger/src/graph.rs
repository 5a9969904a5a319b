//! Transaction graph — the append-only arena that owns every transaction.

use crate::error::LedgerError;
use crate::transaction::Transaction;
use std::collections::HashSet;
use tangle_types::{ConflictId, ProtocolParams, TxId};

/// The tangle: every transaction, in creation order.
///
/// A transaction's parents must already be in the arena when it is created,
/// so no edge can point forward and the graph is acyclic by construction.
/// Structural mutation needs `&mut self`; validators only ever borrow the
/// graph immutably and vote through the atomic flags on each transaction.
#[derive(Debug)]
pub struct TransactionGraph {
    params: ProtocolParams,
    transactions: Vec<Transaction>,
}

impl TransactionGraph {
    /// Create a graph holding the two roots: genesis (no parents) and a
    /// second root whose only parent is genesis.
    pub fn new(params: ProtocolParams) -> Self {
        let validators = params.validators();
        let genesis = Transaction::new(
            TxId::GENESIS,
            None,
            None,
            ConflictId::of(TxId::GENESIS),
            validators,
        );
        let second = Transaction::new(
            TxId::SECOND_ROOT,
            Some(TxId::GENESIS),
            None,
            ConflictId::of(TxId::SECOND_ROOT),
            validators,
        );
        Self {
            params,
            transactions: vec![genesis, second],
        }
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    /// Create a transaction with a fresh conflict id.
    pub fn create_transaction(&mut self, parent1: TxId, parent2: TxId) -> Result<TxId, LedgerError> {
        self.check_parents(parent1, parent2)?;
        let id = self.next_id()?;
        self.push(id, parent1, parent2, ConflictId::of(id));
        tracing::trace!(tx = %id, %parent1, %parent2, "created transaction");
        Ok(id)
    }

    /// Create a double spend of the transaction that introduced `conflict`.
    pub fn create_conflicting_transaction(
        &mut self,
        conflict: ConflictId,
        parent1: TxId,
        parent2: TxId,
    ) -> Result<TxId, LedgerError> {
        let origin = conflict
            .origin()
            .filter(|origin| self.get(*origin).is_some_and(|tx| tx.conflict_id() == conflict))
            .ok_or(LedgerError::UnknownConflict(conflict))?;
        if origin.is_root() {
            return Err(LedgerError::RootConflict(conflict));
        }
        self.check_parents(parent1, parent2)?;
        let id = self.next_id()?;
        self.push(id, parent1, parent2, conflict);
        tracing::debug!(tx = %id, %conflict, %parent1, %parent2, "created conflicting transaction");
        Ok(id)
    }

    pub fn get(&self, id: TxId) -> Option<&Transaction> {
        self.transactions.get(id.index())
    }

    pub fn contains(&self, id: TxId) -> bool {
        id.index() < self.transactions.len()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Always false: the roots exist from construction.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All transactions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = TxId> + '_ {
        self.transactions.iter().map(Transaction::id)
    }

    /// Set the monotonic confirmed flag. Returns `true` if newly confirmed.
    pub fn set_confirmed(&mut self, id: TxId) -> bool {
        self.transactions
            .get_mut(id.index())
            .is_some_and(Transaction::set_confirmed)
    }

    /// Every transitive ancestor of `id`, excluding `id` itself.
    pub fn ancestors(&self, id: TxId) -> HashSet<TxId> {
        let mut seen = HashSet::new();
        let mut stack: Vec<TxId> = self.get(id).into_iter().flat_map(Transaction::parents).collect();
        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            if let Some(tx) = self.get(next) {
                stack.extend(tx.parents());
            }
        }
        seen
    }

    fn check_parents(&self, parent1: TxId, parent2: TxId) -> Result<(), LedgerError> {
        for parent in [parent1, parent2] {
            if !self.contains(parent) {
                return Err(LedgerError::InvalidReference { parent });
            }
        }
        Ok(())
    }

    fn next_id(&self) -> Result<TxId, LedgerError> {
        u32::try_from(self.transactions.len())
            .map(TxId::new)
            .map_err(|_| LedgerError::CapacityExceeded)
    }

    fn push(&mut self, id: TxId, parent1: TxId, parent2: TxId, conflict: ConflictId) {
        self.transactions.push(Transaction::new(
            id,
            Some(parent1),
            Some(parent2),
            conflict,
            self.params.validators(),
        ));
    }
}

impl Default for TransactionGraph {
    fn default() -> Self {
        Self::new(ProtocolParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> TxId {
        TxId::new(n)
    }

    #[test]
    fn new_graph_has_two_roots() {
        let graph = TransactionGraph::default();
        assert_eq!(graph.len(), 2);

        let genesis = graph.get(TxId::GENESIS).unwrap();
        assert_eq!(genesis.parents().count(), 0);

        let second = graph.get(TxId::SECOND_ROOT).unwrap();
        assert_eq!(second.parent1(), Some(TxId::GENESIS));
        assert_eq!(second.parent2(), None);
    }

    #[test]
    fn created_transactions_get_sequential_ids_and_own_conflict() {
        let mut graph = TransactionGraph::default();
        let a = graph.create_transaction(id(0), id(1)).unwrap();
        let b = graph.create_transaction(a, id(1)).unwrap();

        assert_eq!(a, id(2));
        assert_eq!(b, id(3));
        let tx = graph.get(b).unwrap();
        assert_eq!(tx.conflict_id(), ConflictId::new(3));
        assert_eq!(tx.valid_by(), vec![false; 4]);
        assert!(!tx.is_confirmed());
    }

    #[test]
    fn forward_reference_is_rejected_without_insertion() {
        let mut graph = TransactionGraph::default();
        let err = graph.create_transaction(id(0), id(5)).unwrap_err();
        assert_eq!(err, LedgerError::InvalidReference { parent: id(5) });
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn conflicting_transaction_reuses_conflict_id() {
        let mut graph = TransactionGraph::default();
        let a = graph.create_transaction(id(0), id(1)).unwrap();
        let b = graph.create_transaction(a, id(1)).unwrap();
        let ds = graph
            .create_conflicting_transaction(ConflictId::of(a), b, id(1))
            .unwrap();

        let ds_tx = graph.get(ds).unwrap();
        assert_eq!(ds_tx.conflict_id(), ConflictId::of(a));
        assert!(ds_tx.is_conflicting());
    }

    #[test]
    fn conflict_with_root_is_rejected() {
        let mut graph = TransactionGraph::default();
        let err = graph
            .create_conflicting_transaction(ConflictId::new(1), id(0), id(1))
            .unwrap_err();
        assert_eq!(err, LedgerError::RootConflict(ConflictId::new(1)));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn conflict_with_unassigned_id_is_rejected() {
        let mut graph = TransactionGraph::default();
        let a = graph.create_transaction(id(0), id(1)).unwrap();
        let ds = graph
            .create_conflicting_transaction(ConflictId::of(a), id(0), id(1))
            .unwrap();

        // The double spend's own sequence number is not a conflict id anyone holds.
        let err = graph
            .create_conflicting_transaction(ConflictId::of(ds), id(0), id(1))
            .unwrap_err();
        assert_eq!(err, LedgerError::UnknownConflict(ConflictId::of(ds)));

        let err = graph
            .create_conflicting_transaction(ConflictId::new(99), id(0), id(1))
            .unwrap_err();
        assert_eq!(err, LedgerError::UnknownConflict(ConflictId::new(99)));
    }

    #[test]
    fn conflicting_transaction_with_bad_parent_is_rejected() {
        let mut graph = TransactionGraph::default();
        let a = graph.create_transaction(id(0), id(1)).unwrap();
        let err = graph
            .create_conflicting_transaction(ConflictId::of(a), id(7), id(1))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidReference { parent: id(7) });
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn ancestors_cover_both_parents_transitively() {
        let mut graph = TransactionGraph::default();
        let a = graph.create_transaction(id(0), id(1)).unwrap();
        let b = graph.create_transaction(id(1), id(0)).unwrap();
        let c = graph.create_transaction(a, b).unwrap();

        let ancestors = graph.ancestors(c);
        assert_eq!(ancestors, [id(0), id(1), a, b].into_iter().collect());
        assert!(graph.ancestors(TxId::GENESIS).is_empty());
    }

    #[test]
    fn set_confirmed_is_monotonic() {
        let mut graph = TransactionGraph::default();
        assert!(graph.set_confirmed(TxId::GENESIS));
        assert!(!graph.set_confirmed(TxId::GENESIS));
        assert!(graph.get(TxId::GENESIS).unwrap().is_confirmed());
        assert!(!graph.set_confirmed(id(42)));
    }
}
