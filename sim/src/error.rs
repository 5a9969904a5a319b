use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("config error: {0}")]
    Config(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] tangle_ledger::LedgerError),

    #[error("consensus error: {0}")]
    Consensus(#[from] tangle_consensus::ConsensusError),

    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
