use sha2::{Digest, Sha256};

use crate::types::hash::Hash;

/// Domain tag prepended to every internal node preimage.
pub const INTERNAL_NODE_PREFIX: u8 = 0x00;

/// Domain tag prepended to every leaf node preimage.
pub const LEAF_NODE_PREFIX: u8 = 0x01;

/// Compute the SHA-256 hash of arbitrary bytes.
/// This is how raw keys and values become the key and value hashes the trie stores.
pub fn sha256(data: &[u8]) -> Hash {
    Hash(Sha256::digest(data).into())
}

/// Hash an internal node: `sha256(0x00 || left || right)`.
///
/// An absent child contributes 32 zero bytes. It is never omitted from the
/// preimage, so an empty subtree still fixes its position.
pub fn hash_internal(left: Option<&Hash>, right: Option<&Hash>) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([INTERNAL_NODE_PREFIX]);
    hasher.update(left.unwrap_or(&Hash::ZERO).as_bytes());
    hasher.update(right.unwrap_or(&Hash::ZERO).as_bytes());
    Hash(hasher.finalize().into())
}

/// Hash a leaf node: `sha256(0x01 || key_hash || value_hash)`.
pub fn hash_leaf(key_hash: &Hash, value_hash: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_NODE_PREFIX]);
    hasher.update(key_hash.as_bytes());
    hasher.update(value_hash.as_bytes());
    Hash(hasher.finalize().into())
}
