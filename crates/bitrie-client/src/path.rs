use serde::{Deserialize, Serialize};

/// The key being proven, as raw bytes. The trie itself stores `sha256(bytes)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    pub bytes: Vec<u8>,
}

impl MerklePath {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for MerklePath {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
