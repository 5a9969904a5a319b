//! Confirmation chain — a validator's private, append-only record of the
//! tips it accepted, in the order it accepted them.

use serde::{Deserialize, Serialize};
use tangle_types::{EntryId, TxId};

use crate::error::ConsensusError;

/// Sequence number of the first entry in every chain.
pub const FIRST_SEQUENCE: u64 = 1;

/// One accepted tip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// The entry appended just before this one.
    pub previous: Option<EntryId>,
    /// The tip accepted at this step.
    pub transaction: TxId,
    /// Strictly increasing along the chain.
    pub sequence: u64,
}

/// Arena of chain entries. Entries are never removed or rewritten.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfirmationChain {
    entries: Vec<ChainEntry>,
}

impl ConfirmationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `transaction` after the current tail.
    ///
    /// Fails with [`ConsensusError::ChainFull`] once entry ids no longer fit
    /// in a `u32`.
    pub fn append(&mut self, transaction: TxId) -> Result<EntryId, ConsensusError> {
        let id = entry_id(self.entries.len())?;
        let (previous, sequence) = match self.tail() {
            Some(tail) => (self.tail_id(), tail.sequence + 1),
            None => (None, FIRST_SEQUENCE),
        };
        self.entries.push(ChainEntry {
            previous,
            transaction,
            sequence,
        });
        Ok(id)
    }

    pub fn tail_id(&self) -> Option<EntryId> {
        let last = self.entries.len().checked_sub(1)?;
        entry_id(last).ok()
    }

    pub fn tail(&self) -> Option<&ChainEntry> {
        self.entries.last()
    }

    pub fn get(&self, id: EntryId) -> Option<&ChainEntry> {
        self.entries.get(id.index())
    }

    /// Entries from first to last.
    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Entries from the tail back to the first, following `previous` links.
    pub fn walk_back(&self) -> impl Iterator<Item = &ChainEntry> {
        std::iter::successors(self.tail(), |entry| {
            entry.previous.and_then(|prev| self.get(prev))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry_id(position: usize) -> Result<EntryId, ConsensusError> {
    u32::try_from(position)
        .map(EntryId::new)
        .map_err(|_| ConsensusError::ChainFull)
}
