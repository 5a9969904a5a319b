//! Stable identities for transactions, conflicts and chain entries.
//!
//! Every walk in the workspace keys its visited sets on these ids, never on
//! the contents of a transaction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arena index of a transaction. Equal to its creation sequence number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxId(u32);

impl TxId {
    /// The genesis root.
    pub const GENESIS: Self = Self(0);
    /// The second root, whose only parent is genesis.
    pub const SECOND_ROOT: Self = Self(1);

    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn is_root(self) -> bool {
        self.0 <= Self::SECOND_ROOT.0
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.0)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier shared by mutually exclusive transactions (double spends).
///
/// A transaction created without a conflict carries the id matching its own
/// creation sequence number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConflictId(u64);

impl ConflictId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// The conflict id a fresh, non-conflicting transaction receives.
    pub fn of(tx: TxId) -> Self {
        Self(u64::from(tx.as_u32()))
    }

    /// The transaction that originally introduced this conflict id.
    pub fn origin(self) -> Option<TxId> {
        u32::try_from(self.0).ok().map(TxId::new)
    }
}

impl fmt::Debug for ConflictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConflictId({})", self.0)
    }
}

impl fmt::Display for ConflictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of an entry inside one validator's confirmation chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(u32);

impl EntryId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_are_the_first_two_ids() {
        assert!(TxId::GENESIS.is_root());
        assert!(TxId::SECOND_ROOT.is_root());
        assert!(!TxId::new(2).is_root());
    }

    #[test]
    fn conflict_id_of_tx_points_back_at_it() {
        let tx = TxId::new(42);
        let conflict = ConflictId::of(tx);
        assert_eq!(conflict.as_u64(), 42);
        assert_eq!(conflict.origin(), Some(tx));
    }

    #[test]
    fn oversized_conflict_id_has_no_origin() {
        let conflict = ConflictId::new(u64::from(u32::MAX) + 1);
        assert_eq!(conflict.origin(), None);
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(TxId::new(7).to_string(), "7");
        assert_eq!(ConflictId::new(3).to_string(), "3");
    }
}
