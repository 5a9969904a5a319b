//! Protocol parameters — the fault tolerance and everything derived from it.

use serde::{Deserialize, Serialize};

/// Parameters fixed for the lifetime of a graph.
///
/// Only the byzantine fault tolerance `f` is stored. The validator count
/// (`3f + 1`) and the quorum (`validators - f`) are derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Number of faulty validators the set tolerates.
    #[serde(default = "default_fault_tolerance")]
    pub byzantine_fault_tolerance: usize,
}

fn default_fault_tolerance() -> usize {
    1
}

impl ProtocolParams {
    /// Largest fault tolerance the derived counts are defined for.
    pub const MAX_FAULT_TOLERANCE: usize = 1024;

    pub fn new(byzantine_fault_tolerance: usize) -> Self {
        Self {
            byzantine_fault_tolerance,
        }
    }

    /// Whether `f` is within [`Self::MAX_FAULT_TOLERANCE`].
    pub fn is_supported(&self) -> bool {
        self.byzantine_fault_tolerance <= Self::MAX_FAULT_TOLERANCE
    }

    /// Number of validators: `3f + 1`. Only meaningful for supported params.
    pub fn validators(&self) -> usize {
        3 * self.byzantine_fault_tolerance + 1
    }

    /// Votes a transaction needs to be confirmed: `validators - f`.
    pub fn quorum(&self) -> usize {
        self.validators() - self.byzantine_fault_tolerance
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self::new(default_fault_tolerance())
    }
}
