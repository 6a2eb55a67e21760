use thiserror::Error;

/// Errors during sparse Merkle trie proof decoding and verification.
/// Each variant is specific enough to tell a malformed proof apart from a
/// well-formed proof for a different root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("Incorrect hash length: expected 32 bytes, got {got}")]
    IncorrectHashLength { got: usize },

    #[error("Malformed proof: {reason}")]
    MalformedProof { reason: String },

    #[error("Incorrect proof type: expected {expected} proof")]
    IncorrectProofType { expected: &'static str },

    #[error("Invalid non-membership proof: expecting node to not have a {side} child, but it has one")]
    UnexpectedChild { side: &'static str },

    #[error("Invalid non-membership proof: node doesn't share a common bit prefix with the key (diverges at bit {index})")]
    NotCommonPrefix { index: usize },

    #[error("Invalid non-membership proof: the witness leaf is the key itself")]
    KeyExists,

    #[error("Computed root hash {computed} doesn't match the expected root {expected}")]
    RootHashMismatch { computed: String, expected: String },
}

impl ProofError {
    /// Stable numeric code for hosts that register errors by number.
    pub fn code(&self) -> u32 {
        match self {
            ProofError::IncorrectHashLength { .. } => 2,
            ProofError::MalformedProof { .. } => 3,
            ProofError::IncorrectProofType { .. } => 4,
            ProofError::UnexpectedChild { .. } => 5,
            ProofError::NotCommonPrefix { .. } => 6,
            ProofError::RootHashMismatch { .. } => 7,
            ProofError::KeyExists => 8,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ProofError::MalformedProof {
            reason: reason.into(),
        }
    }
}
