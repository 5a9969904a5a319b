use tangle_types::{ConflictId, TxId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid reference: parent {parent} does not exist")]
    InvalidReference { parent: TxId },

    #[error("conflict id {0} was never assigned to a transaction")]
    UnknownConflict(ConflictId),

    #[error("conflict id {0} belongs to a root transaction")]
    RootConflict(ConflictId),

    #[error("graph needs at least {needed} transactions, has {have}")]
    InsufficientTransactions { needed: usize, have: usize },

    #[error("transaction arena is full")]
    CapacityExceeded,
}
