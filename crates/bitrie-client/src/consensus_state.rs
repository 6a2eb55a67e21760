use bitrie_core::Hash;
use serde::{Deserialize, Serialize};

use crate::CLIENT_TYPE;

/// What the client has accepted about the counterparty chain at one height.
/// `root` is the trusted trie root every proof at that height is checked against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    /// Block time, in nanoseconds since the Unix epoch.
    pub timestamp: u64,
    pub root: Hash,
    pub next_validators_hash: Hash,
}

impl ConsensusState {
    pub fn new(timestamp: u64, root: Hash, next_validators_hash: Hash) -> Self {
        Self {
            timestamp,
            root,
            next_validators_hash,
        }
    }

    pub fn client_type(&self) -> &'static str {
        CLIENT_TYPE
    }
}
