//! Conflict index — groups of transactions sharing a conflict id.
//!
//! Derived on demand from the graph for presentation. Consensus never
//! consults it; validators discover conflicts by walking the graph.

use crate::graph::TransactionGraph;
use std::collections::BTreeMap;
use tangle_types::{ConflictId, TxId};

/// Read-only view of every conflict id carried by more than one transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConflictIndex {
    /// Conflict id → carriers in creation order.
    groups: BTreeMap<ConflictId, Vec<TxId>>,
}

impl ConflictIndex {
    pub fn build(graph: &TransactionGraph) -> Self {
        let mut all: BTreeMap<ConflictId, Vec<TxId>> = BTreeMap::new();
        for tx in graph.iter() {
            all.entry(tx.conflict_id()).or_default().push(tx.id());
        }
        all.retain(|_, carriers| carriers.len() > 1);
        Self { groups: all }
    }

    /// Carriers of `conflict`, or `None` if it is not contested.
    pub fn carriers(&self, conflict: ConflictId) -> Option<&[TxId]> {
        self.groups.get(&conflict).map(Vec::as_slice)
    }

    /// Whether `tx` is a later alternative of some contested conflict id.
    pub fn is_double_spend(&self, conflict: ConflictId, tx: TxId) -> bool {
        self.carriers(conflict)
            .is_some_and(|carriers| carriers.iter().skip(1).any(|c| *c == tx))
    }

    /// Whether `conflict` is contested at all.
    pub fn is_contested(&self, conflict: ConflictId) -> bool {
        self.groups.contains_key(&conflict)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConflictId, &[TxId])> {
        self.groups.iter().map(|(id, carriers)| (*id, carriers.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
