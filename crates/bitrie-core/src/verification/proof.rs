use tracing::{debug, trace};

use crate::error::ProofError;
use crate::types::hash::Hash;
use crate::types::node::{LeafNode, Node};
use crate::types::proof::{
    check_depth, check_internal_witness_depth, MembershipProof, NonMembershipProof, Proof,
};
use crate::verification::bits::KeyBits;
use crate::verification::hasher::{hash_internal, hash_leaf, sha256};

/// Verify that `key` maps to `value` in the trie with root `root`.
///
/// `key` and `value` are raw bytes; the trie commits to their SHA-256 hashes.
/// The root must come from a trusted source, never from the proof's sender.
pub fn verify_membership(
    root: &Hash,
    key: &[u8],
    value: &[u8],
    proof: &Proof,
) -> Result<(), ProofError> {
    let Proof::Membership(membership) = proof else {
        return Err(ProofError::IncorrectProofType {
            expected: "membership",
        });
    };

    verify_membership_proof(root, &sha256(key), &sha256(value), membership)
}

/// Verify that `key` is absent from the trie with root `root`.
pub fn verify_non_membership(root: &Hash, key: &[u8], proof: &Proof) -> Result<(), ProofError> {
    let Proof::NonMembership(non_membership) = proof else {
        return Err(ProofError::IncorrectProofType {
            expected: "non-membership",
        });
    };

    verify_non_membership_proof(root, &sha256(key), non_membership)
}

/// Like [`verify_membership`], for callers that already hold the key and value hashes.
pub fn verify_membership_hashed(
    root: &Hash,
    key_hash: &Hash,
    value_hash: &Hash,
    proof: &Proof,
) -> Result<(), ProofError> {
    match proof {
        Proof::Membership(membership) => {
            verify_membership_proof(root, key_hash, value_hash, membership)
        }
        Proof::NonMembership(_) => Err(ProofError::IncorrectProofType {
            expected: "membership",
        }),
    }
}

/// Like [`verify_non_membership`], for callers that already hold the key hash.
pub fn verify_non_membership_hashed(
    root: &Hash,
    key_hash: &Hash,
    proof: &Proof,
) -> Result<(), ProofError> {
    match proof {
        Proof::NonMembership(non_membership) => {
            verify_non_membership_proof(root, key_hash, non_membership)
        }
        Proof::Membership(_) => Err(ProofError::IncorrectProofType {
            expected: "non-membership",
        }),
    }
}

fn verify_membership_proof(
    root: &Hash,
    key_hash: &Hash,
    value_hash: &Hash,
    proof: &MembershipProof,
) -> Result<(), ProofError> {
    check_depth(proof.sibling_hashes.len())?;

    let leaf = hash_leaf(key_hash, value_hash);
    compare_root(root, key_hash, &proof.sibling_hashes, leaf)
}

fn verify_non_membership_proof(
    root: &Hash,
    key_hash: &Hash,
    proof: &NonMembershipProof,
) -> Result<(), ProofError> {
    let depth = proof.sibling_hashes.len();
    check_depth(depth)?;

    let bits = KeyBits::new(key_hash.as_bytes());

    let witness = match &proof.node {
        Node::Internal(internal) => {
            check_internal_witness_depth(depth)?;
            // The key's path continues into the child slot selected by its
            // next bit. That slot must be empty.
            let right = bits.bit(depth);
            if internal.child(right).is_some() {
                let side = if right { "right" } else { "left" };
                debug!(depth, side, "non-membership witness has a child on the key's path");
                return Err(ProofError::UnexpectedChild { side });
            }
            internal.hash()
        }
        Node::Leaf(leaf) => {
            check_common_prefix(key_hash, &bits, leaf, depth)?;
            leaf.hash()
        }
    };

    compare_root(root, key_hash, &proof.sibling_hashes, witness)
}

/// A leaf witness must sit on the key's path: every bit above its depth agrees.
/// It must also belong to some other key, or it would prove presence instead.
fn check_common_prefix(
    key_hash: &Hash,
    bits: &KeyBits<'_>,
    leaf: &LeafNode,
    depth: usize,
) -> Result<(), ProofError> {
    if leaf.key_hash == *key_hash {
        debug!(depth, "non-membership leaf witness holds the key being proven absent");
        return Err(ProofError::KeyExists);
    }

    let witness_bits = KeyBits::new(leaf.key_hash.as_bytes());
    match (0..depth).find(|&i| witness_bits.bit(i) != bits.bit(i)) {
        Some(index) => {
            debug!(index, depth, "non-membership leaf witness leaves the key's path");
            Err(ProofError::NotCommonPrefix { index })
        }
        None => Ok(()),
    }
}

fn compare_root(
    root: &Hash,
    key_hash: &Hash,
    sibling_hashes: &[Option<Hash>],
    start: Hash,
) -> Result<(), ProofError> {
    let computed = compute_root(key_hash, sibling_hashes, start)?;
    trace!(%computed, expected = %root, depth = sibling_hashes.len(), "recomputed root");

    if computed != *root {
        debug!(%computed, expected = %root, "root hash mismatch");
        return Err(ProofError::RootHashMismatch {
            computed: computed.to_string(),
            expected: root.to_string(),
        });
    }
    Ok(())
}

/// Fold `start` up to the root through `sibling_hashes`, deepest level first.
///
/// The bit of `key_hash` at each depth says which side the running hash takes:
/// 0 puts it on the left of its sibling, 1 on the right. An empty slice
/// returns `start` unchanged. More siblings than the key hash has bits is a
/// malformed proof.
pub fn compute_root(
    key_hash: &Hash,
    sibling_hashes: &[Option<Hash>],
    start: Hash,
) -> Result<Hash, ProofError> {
    check_depth(sibling_hashes.len())?;
    let bits = KeyBits::new(key_hash.as_bytes());

    let root = sibling_hashes
        .iter()
        .enumerate()
        .rev()
        .fold(start, |current, (depth, sibling)| {
            if bits.bit(depth) {
                hash_internal(sibling.as_ref(), Some(&current))
            } else {
                hash_internal(Some(&current), sibling.as_ref())
            }
        });
    Ok(root)
}
