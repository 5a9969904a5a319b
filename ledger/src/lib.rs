//! Tangle ledger.
//!
//! Every transaction references two earlier transactions, so the ledger is a
//! DAG growing from two roots. The graph owns every node; everything else
//! refers to nodes by [`TxId`](tangle_types::TxId).

pub mod conflicts;
pub mod error;
pub mod graph;
pub mod tips;
pub mod transaction;

pub use conflicts::ConflictIndex;
pub use error::LedgerError;
pub use graph::TransactionGraph;
pub use tips::compute_tips;
pub use transaction::Transaction;
