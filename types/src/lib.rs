//! Fundamental types for the tangle confirmation model.
//!
//! This crate defines the identifiers and protocol parameters shared by the
//! ledger, consensus and simulator crates.

pub mod ids;
pub mod params;

pub use ids::{ConflictId, EntryId, TxId};
pub use params::ProtocolParams;
