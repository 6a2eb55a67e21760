pub mod bits;
pub mod hasher;
pub mod proof;

#[cfg(test)]
mod testing;

pub use bits::*;
pub use hasher::*;
pub use proof::*;

#[cfg(test)]
mod tests {
    use super::testing::TestTrie;
    use super::*;
    use crate::error::ProofError;
    use crate::types::hash::Hash;
    use crate::types::node::Node;
    use crate::types::proof::Proof;

    const ENTRIES: &[(&[u8], &[u8])] = &[
        (b"alice", b"100"),
        (b"bob", b"250"),
        (b"carol", b"7"),
        (b"dave", b"0"),
        (b"erin", b"31337"),
        (b"frank", b"42"),
        (b"grace", b"9000"),
        (b"heidi", b"1"),
    ];

    const ABSENT: &[&[u8]] = &[b"ivan", b"judy", b"mallory", b"niaj", b"olivia", b"peggy"];

    fn flip_bit(hash: &Hash, bit: usize) -> Hash {
        let mut bytes = hash.0;
        bytes[bit / 8] ^= 1 << (bit % 8);
        Hash(bytes)
    }

    fn trie() -> (TestTrie, Hash) {
        let trie = TestTrie::new(ENTRIES);
        let root = trie.root().unwrap();
        (trie, root)
    }

    #[test]
    fn test_every_present_key_verifies() {
        let (trie, root) = trie();
        for (key, value) in ENTRIES {
            let proof = trie.prove(key);
            assert!(matches!(proof, Proof::Membership(_)));
            assert_eq!(verify_membership(&root, key, value, &proof), Ok(()));
        }
    }

    #[test]
    fn test_every_absent_key_verifies() {
        let (trie, root) = trie();
        for key in ABSENT {
            let proof = trie.prove(key);
            assert!(matches!(proof, Proof::NonMembership(_)));
            assert_eq!(verify_non_membership(&root, key, &proof), Ok(()));
        }
    }

    #[test]
    fn test_proofs_survive_json() {
        let (trie, root) = trie();
        for (key, value) in ENTRIES {
            let json = trie.prove(key).to_json().unwrap();
            let proof = Proof::from_json(json.as_bytes()).unwrap();
            assert_eq!(verify_membership(&root, key, value, &proof), Ok(()));
        }
        for key in ABSENT {
            let json = trie.prove(key).to_json().unwrap();
            let proof = Proof::from_json(json.as_bytes()).unwrap();
            assert_eq!(verify_non_membership(&root, key, &proof), Ok(()));
        }
    }

    #[test]
    fn test_present_key_cannot_be_proven_absent() {
        let (trie, root) = trie();
        for key in ABSENT {
            let proof = trie.prove(key);
            for (present, _) in ENTRIES {
                assert!(verify_non_membership(&root, present, &proof).is_err());
            }
        }
    }

    #[test]
    fn test_wrong_value_fails() {
        let (trie, root) = trie();
        let proof = trie.prove(b"alice");
        assert!(matches!(
            verify_membership(&root, b"alice", b"101", &proof),
            Err(ProofError::RootHashMismatch { .. })
        ));
    }

    #[test]
    fn test_tampered_sibling_fails() {
        let (trie, root) = trie();
        for (key, value) in ENTRIES {
            let Proof::Membership(membership) = trie.prove(key) else {
                panic!("expected membership proof");
            };
            for level in 0..membership.sibling_hashes.len() {
                let original = membership.sibling_hashes[level].unwrap_or(Hash::ZERO);
                for bit in [0, 7, 100, 255] {
                    let mut tampered = membership.clone();
                    tampered.sibling_hashes[level] = Some(flip_bit(&original, bit));
                    let proof = Proof::Membership(tampered);
                    assert!(matches!(
                        verify_membership(&root, key, value, &proof),
                        Err(ProofError::RootHashMismatch { .. })
                    ));
                }
            }
        }
    }

    #[test]
    fn test_tampered_witness_fails() {
        let (trie, root) = trie();
        for key in ABSENT {
            let Proof::NonMembership(non_membership) = trie.prove(key) else {
                panic!("expected non-membership proof");
            };
            let mut tampered = non_membership.clone();
            match &mut tampered.node {
                Node::Leaf(leaf) => leaf.value_hash = flip_bit(&leaf.value_hash, 3),
                Node::Internal(internal) => {
                    let slot = if internal.left_hash.is_some() {
                        &mut internal.left_hash
                    } else {
                        &mut internal.right_hash
                    };
                    *slot = slot.map(|h| flip_bit(&h, 3));
                }
            }
            assert!(verify_non_membership(&root, key, &Proof::NonMembership(tampered)).is_err());
        }
    }

    #[test]
    fn test_tampered_root_fails() {
        let (trie, root) = trie();
        let proof = trie.prove(b"bob");
        for bit in [0, 128, 255] {
            assert!(matches!(
                verify_membership(&flip_bit(&root, bit), b"bob", b"250", &proof),
                Err(ProofError::RootHashMismatch { .. })
            ));
        }
    }
}
