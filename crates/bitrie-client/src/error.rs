use bitrie_core::ProofError;
use thiserror::Error;

use crate::height::Height;

/// Errors from the light client's membership and non-membership checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Client state height < proof height ({latest} < {proof}), please ensure the client has been updated")]
    InvalidHeight { latest: Height, proof: Height },

    #[error("Processed time not found for height {height}")]
    ProcessedTimeNotFound { height: Height },

    #[error("Processed height not found for height {height}")]
    ProcessedHeightNotFound { height: Height },

    #[error("Cannot verify packet until time {valid_time}, current time {current_time}")]
    DelayTimeNotPassed { valid_time: u64, current_time: u64 },

    #[error("Cannot verify packet until height {valid_height}, current height {current_height}")]
    DelayBlocksNotPassed {
        valid_height: Height,
        current_height: Height,
    },

    #[error("Failed to decode proof: {reason}")]
    InvalidProof { reason: String },

    #[error("Merkle path is empty")]
    EmptyPath,

    #[error("Consensus state not found at height {height}, please ensure the proof was constructed against a height that exists on the client")]
    ConsensusStateNotFound { height: Height },

    #[error(transparent)]
    Proof(#[from] ProofError),

    /// Failure reported by the host's base client implementation. The
    /// wrapper passes these through untouched.
    #[error("Base client error: {reason}")]
    Base { reason: String },
}
