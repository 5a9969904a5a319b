//! Transaction node — two parent links, a conflict id and per-validator votes.

use std::sync::atomic::{AtomicBool, Ordering};
use tangle_types::{ConflictId, TxId};

/// A node in the tangle.
///
/// Parents and the conflict id never change after creation. The only mutable
/// state is one validity flag per validator and the monotonic `confirmed`
/// flag. Validity flags are atomics so distinct validators can vote on the
/// same transaction from different threads.
#[derive(Debug)]
pub struct Transaction {
    id: TxId,
    parent1: Option<TxId>,
    parent2: Option<TxId>,
    conflict_id: ConflictId,
    valid_by: Box<[AtomicBool]>,
    confirmed: bool,
}

impl Transaction {
    pub(crate) fn new(
        id: TxId,
        parent1: Option<TxId>,
        parent2: Option<TxId>,
        conflict_id: ConflictId,
        validators: usize,
    ) -> Self {
        Self {
            id,
            parent1,
            parent2,
            conflict_id,
            valid_by: (0..validators).map(|_| AtomicBool::new(false)).collect(),
            confirmed: false,
        }
    }

    pub fn id(&self) -> TxId {
        self.id
    }

    pub fn parent1(&self) -> Option<TxId> {
        self.parent1
    }

    pub fn parent2(&self) -> Option<TxId> {
        self.parent2
    }

    /// Present parents, `parent1` first.
    pub fn parents(&self) -> impl Iterator<Item = TxId> {
        self.parent1.into_iter().chain(self.parent2)
    }

    pub fn conflict_id(&self) -> ConflictId {
        self.conflict_id
    }

    /// Whether this transaction reuses the conflict id of an earlier one.
    pub fn is_conflicting(&self) -> bool {
        self.conflict_id != ConflictId::of(self.id)
    }

    /// Whether `validator` currently counts this transaction as valid.
    /// Out-of-range validators never have.
    pub fn is_valid_for(&self, validator: usize) -> bool {
        self.valid_by
            .get(validator)
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Set the validity flag for `validator`. Returns `true` if it was unset.
    pub fn mark_valid(&self, validator: usize) -> bool {
        self.valid_by
            .get(validator)
            .is_some_and(|flag| !flag.swap(true, Ordering::Relaxed))
    }

    /// Clear the validity flag for `validator`. Returns `true` if it was set.
    pub fn revoke(&self, validator: usize) -> bool {
        self.valid_by
            .get(validator)
            .is_some_and(|flag| flag.swap(false, Ordering::Relaxed))
    }

    /// Snapshot of every validator's flag, indexed by validator.
    pub fn valid_by(&self) -> Vec<bool> {
        self.valid_by
            .iter()
            .map(|flag| flag.load(Ordering::Relaxed))
            .collect()
    }

    /// Number of validators currently voting for this transaction.
    pub fn vote_count(&self) -> usize {
        self.valid_by
            .iter()
            .filter(|flag| flag.load(Ordering::Relaxed))
            .count()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Confirmation is one-way; there is no inverse.
    pub(crate) fn set_confirmed(&mut self) -> bool {
        let changed = !self.confirmed;
        self.confirmed = true;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: u32, conflict: u64) -> Transaction {
        Transaction::new(
            TxId::new(id),
            Some(TxId::GENESIS),
            Some(TxId::SECOND_ROOT),
            ConflictId::new(conflict),
            4,
        )
    }

    #[test]
    fn new_transaction_has_no_votes() {
        let t = tx(2, 2);
        assert_eq!(t.valid_by(), vec![false; 4]);
        assert_eq!(t.vote_count(), 0);
        assert!(!t.is_confirmed());
    }

    #[test]
    fn mark_and_revoke_report_transitions() {
        let t = tx(2, 2);
        assert!(t.mark_valid(1));
        assert!(!t.mark_valid(1));
        assert!(t.is_valid_for(1));
        assert_eq!(t.vote_count(), 1);

        assert!(t.revoke(1));
        assert!(!t.revoke(1));
        assert!(!t.is_valid_for(1));
    }

    #[test]
    fn out_of_range_validator_is_ignored() {
        let t = tx(2, 2);
        assert!(!t.mark_valid(9));
        assert!(!t.is_valid_for(9));
        assert!(!t.revoke(9));
    }

    #[test]
    fn parents_yield_parent1_first() {
        let t = tx(2, 2);
        let parents: Vec<_> = t.parents().collect();
        assert_eq!(parents, vec![TxId::GENESIS, TxId::SECOND_ROOT]);
    }

    #[test]
    fn conflicting_when_id_differs_from_sequence() {
        assert!(!tx(5, 5).is_conflicting());
        assert!(tx(6, 3).is_conflicting());
    }

    #[test]
    fn confirmation_is_sticky() {
        let mut t = tx(2, 2);
        assert!(t.set_confirmed());
        assert!(!t.set_confirmed());
        assert!(t.is_confirmed());
    }
}
