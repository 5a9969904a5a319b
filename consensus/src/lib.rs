//! Consensus — validator voting and double-spend resolution over the tangle.
//!
//! Each validator walks the shared graph on its own:
//! - it accepts a tip only when no unresolved conflict is visible beneath it,
//! - marks the tip's whole ancestry valid for itself,
//! - records the tip in a private append-only chain,
//! - and replays that chain to demote every double spend except the first
//!   one it reached.
//!
//! A transaction is confirmed once `validators - f` validators hold it valid.
//!
//! ## Module overview
//!
//! - [`traversal`] — conflict check run before accepting a tip.
//! - [`validator`] — per-validator round: accept, chain, confirm ancestry.
//! - [`chain`] — the append-only confirmation chain.
//! - [`resolver`] — oldest-wins replay of a chain.
//! - [`quorum`] — global confirmation sweep.
//! - [`validator_set`] — all validators of a run, sequential or parallel rounds.
//! - [`error`] — consensus error types.

pub mod chain;
pub mod error;
pub mod quorum;
pub mod resolver;
pub mod traversal;
pub mod validator;
pub mod validator_set;

pub use chain::{ChainEntry, ConfirmationChain};
pub use error::ConsensusError;
pub use quorum::{evaluate_quorum, has_quorum, QuorumReport};
pub use resolver::{resolve, ResolveOutcome, Revocation};
pub use traversal::{can_accept, find_unresolved_conflict, UnresolvedConflict};
pub use validator::{confirm, run_validator, RoundOutcome, Validator};
pub use validator_set::{ValidatorRound, ValidatorSet};
