use serde::{Deserialize, Serialize};

use crate::error::ProofError;
use crate::types::hash::{Hash, HASH_LEN};
use crate::types::node::{decode_optional, Node, RawNode};

/// Deepest level a key hash can address: one level per bit of the digest.
pub const MAX_DEPTH: usize = HASH_LEN * 8;

/// A Merkle proof against a binary sparse Merkle trie root.
///
/// `sibling_hashes[0]` is the sibling just below the root and the last entry
/// is the sibling at the proven node's own level. A `None` sibling is an empty
/// subtree and hashes as [`Hash::ZERO`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProof", into = "RawProof")]
pub enum Proof {
    Membership(MembershipProof),
    NonMembership(NonMembershipProof),
}

/// Proof that a key exists with a given value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MembershipProof {
    pub sibling_hashes: Vec<Option<Hash>>,
}

/// Proof that a key does not exist.
///
/// `node` is what sits at depth `sibling_hashes.len()` on the key's path:
/// either an internal node with no child on the key's side, or a leaf for a
/// different key sharing the path prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonMembershipProof {
    pub node: Node,
    pub sibling_hashes: Vec<Option<Hash>>,
}

impl Proof {
    /// Decode and validate a JSON-encoded proof.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ProofError> {
        let raw: RawProof = serde_json::from_slice(bytes)
            .map_err(|e| ProofError::malformed(format!("invalid proof JSON: {e}")))?;
        Proof::try_from(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Number of levels between the root and the proven node.
    pub fn depth(&self) -> usize {
        self.sibling_hashes().len()
    }

    pub fn sibling_hashes(&self) -> &[Option<Hash>] {
        match self {
            Proof::Membership(proof) => &proof.sibling_hashes,
            Proof::NonMembership(proof) => &proof.sibling_hashes,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Proof::Membership(_) => "membership",
            Proof::NonMembership(_) => "non-membership",
        }
    }
}

/// Reject sibling sequences deeper than the key hash has bits.
pub(crate) fn check_depth(depth: usize) -> Result<(), ProofError> {
    if depth > MAX_DEPTH {
        return Err(ProofError::malformed(format!(
            "{depth} sibling hashes exceed the maximum depth of {MAX_DEPTH}"
        )));
    }
    Ok(())
}

/// An internal witness needs one more key bit below its own depth.
pub(crate) fn check_internal_witness_depth(depth: usize) -> Result<(), ProofError> {
    if depth >= MAX_DEPTH {
        return Err(ProofError::malformed(format!(
            "internal node cannot sit at depth {depth}, leaves are at most {MAX_DEPTH} deep"
        )));
    }
    Ok(())
}

/// Wire form of [`Proof`], mirroring the JSON layout field for field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProof {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<RawMembershipProof>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_membership: Option<RawNonMembershipProof>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMembershipProof {
    pub sibling_hashes: Vec<Option<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNonMembershipProof {
    pub proof_node: RawNode,
    pub sibling_hashes: Vec<Option<String>>,
}

impl RawProof {
    /// Structural checks that need no hashing: exactly one variant, a
    /// well-tagged witness node, and a depth the key hash can address.
    pub fn validate(&self) -> Result<(), ProofError> {
        match (&self.membership, &self.non_membership) {
            (Some(membership), None) => check_depth(membership.sibling_hashes.len()),
            (None, Some(non_membership)) => {
                non_membership.proof_node.validate()?;
                let depth = non_membership.sibling_hashes.len();
                check_depth(depth)?;
                if non_membership.proof_node.internal.is_some() {
                    check_internal_witness_depth(depth)?;
                }
                Ok(())
            }
            _ => Err(ProofError::malformed(
                "proof must be exactly one of membership or non_membership",
            )),
        }
    }
}

fn decode_siblings(encoded: &[Option<String>]) -> Result<Vec<Option<Hash>>, ProofError> {
    encoded
        .iter()
        .map(|sibling| decode_optional(sibling.as_deref()))
        .collect()
}

fn encode_siblings(siblings: &[Option<Hash>]) -> Vec<Option<String>> {
    siblings
        .iter()
        .map(|sibling| sibling.map(|h| h.to_base64()))
        .collect()
}

impl TryFrom<RawProof> for Proof {
    type Error = ProofError;

    fn try_from(raw: RawProof) -> Result<Self, Self::Error> {
        raw.validate()?;
        match (raw.membership, raw.non_membership) {
            (Some(membership), None) => Ok(Proof::Membership(MembershipProof {
                sibling_hashes: decode_siblings(&membership.sibling_hashes)?,
            })),
            (None, Some(non_membership)) => Ok(Proof::NonMembership(NonMembershipProof {
                node: Node::try_from(non_membership.proof_node)?,
                sibling_hashes: decode_siblings(&non_membership.sibling_hashes)?,
            })),
            _ => Err(ProofError::malformed(
                "proof must be exactly one of membership or non_membership",
            )),
        }
    }
}

impl From<Proof> for RawProof {
    fn from(proof: Proof) -> Self {
        match proof {
            Proof::Membership(membership) => RawProof {
                membership: Some(RawMembershipProof {
                    sibling_hashes: encode_siblings(&membership.sibling_hashes),
                }),
                non_membership: None,
            },
            Proof::NonMembership(non_membership) => RawProof {
                membership: None,
                non_membership: Some(RawNonMembershipProof {
                    proof_node: non_membership.node.into(),
                    sibling_hashes: encode_siblings(&non_membership.sibling_hashes),
                }),
            },
        }
    }
}
