use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("validator {index} out of range: the set has {validators} validators")]
    ValidatorOutOfRange { index: usize, validators: usize },

    #[error("confirmation chain is full")]
    ChainFull,
}
