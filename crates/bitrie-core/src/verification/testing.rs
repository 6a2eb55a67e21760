//! A tiny in-memory sparse trie used to produce reference roots and proofs.

use crate::types::hash::Hash;
use crate::types::node::{InternalNode, LeafNode, Node};
use crate::types::proof::{MembershipProof, NonMembershipProof, Proof};
use crate::verification::bits::bit_at;
use crate::verification::hasher::{hash_internal, sha256};

pub(crate) struct TestTrie {
    leaves: Vec<LeafNode>,
}

impl TestTrie {
    pub(crate) fn new(entries: &[(&[u8], &[u8])]) -> Self {
        let leaves = entries
            .iter()
            .map(|(key, value)| LeafNode {
                key_hash: sha256(key),
                value_hash: sha256(value),
            })
            .collect();
        Self { leaves }
    }

    pub(crate) fn root(&self) -> Option<Hash> {
        let all: Vec<&LeafNode> = self.leaves.iter().collect();
        subtree_hash(&all, 0)
    }

    /// Walk the key's path, returning either a membership or a non-membership proof.
    pub(crate) fn prove(&self, key: &[u8]) -> Proof {
        let key_hash = sha256(key);
        let mut here: Vec<&LeafNode> = self.leaves.iter().collect();
        let mut siblings = Vec::new();

        for depth in 0.. {
            if here.len() == 1 {
                let leaf = here[0];
                if leaf.key_hash == key_hash {
                    return Proof::Membership(MembershipProof {
                        sibling_hashes: siblings,
                    });
                }
                return Proof::NonMembership(NonMembershipProof {
                    node: Node::Leaf(leaf.clone()),
                    sibling_hashes: siblings,
                });
            }

            let (left, right) = split(&here, depth);
            let go_right = bit_at(key_hash.as_bytes(), depth);
            let (ours, theirs) = if go_right { (right, left) } else { (left, right) };

            if ours.is_empty() {
                let other = subtree_hash(&theirs, depth + 1);
                let node = if go_right {
                    InternalNode {
                        left_hash: other,
                        right_hash: None,
                    }
                } else {
                    InternalNode {
                        left_hash: None,
                        right_hash: other,
                    }
                };
                return Proof::NonMembership(NonMembershipProof {
                    node: Node::Internal(node),
                    sibling_hashes: siblings,
                });
            }

            siblings.push(subtree_hash(&theirs, depth + 1));
            here = ours;
        }
        unreachable!("distinct key hashes split before the digest runs out of bits")
    }
}

fn split<'a>(leaves: &[&'a LeafNode], depth: usize) -> (Vec<&'a LeafNode>, Vec<&'a LeafNode>) {
    leaves
        .iter()
        .copied()
        .partition(|leaf| !bit_at(leaf.key_hash.as_bytes(), depth))
}

fn subtree_hash(leaves: &[&LeafNode], depth: usize) -> Option<Hash> {
    match leaves {
        [] => None,
        [leaf] => Some(leaf.hash()),
        _ => {
            let (left, right) = split(leaves, depth);
            let left = subtree_hash(&left, depth + 1);
            let right = subtree_hash(&right, depth + 1);
            Some(hash_internal(left.as_ref(), right.as_ref()))
        }
    }
}
