//! # Bitrie Core
//!
//! Pure Rust verification of binary sparse Merkle trie proofs.
//!
//! This crate contains **no I/O** and **no host dependencies**. Every
//! membership or non-membership claim about a bitrie state passes through
//! these functions before a light client trusts it.
//!
//! ## Trust Model
//!
//! - **Root hash**: trusted, supplied by the caller from its own verified
//!   consensus state. Nothing here checks where it came from.
//! - **Proofs** (`types` module): untrusted. Decoding checks structure
//!   (exactly one variant, 32-byte hashes, bounded depth) before anything
//!   is hashed.
//! - **Verification** (`verification` module): recomputes the root from the
//!   proven node and its siblings, steering left or right by the bits of the
//!   key hash, and compares it with the trusted root.
//!
//! ## Usage
//!
//! ```ignore
//! use bitrie_core::{verify_membership, Proof};
//!
//! let proof = Proof::from_json(proof_bytes)?;
//! verify_membership(&trusted_root, key, value, &proof)?;
//! ```

pub mod error;
pub mod types;
pub mod verification;

// Re-export commonly used types for convenience
pub use error::ProofError;
pub use types::{
    hash::{Hash, HASH_LEN},
    node::{InternalNode, LeafNode, Node},
    proof::{MembershipProof, NonMembershipProof, Proof, MAX_DEPTH},
};
pub use verification::{
    bits::{bit_at, KeyBits},
    hasher::{hash_internal, hash_leaf, sha256, INTERNAL_NODE_PREFIX, LEAF_NODE_PREFIX},
    proof::{
        compute_root, verify_membership, verify_membership_hashed, verify_non_membership,
        verify_non_membership_hashed,
    },
};
