use serde::{Deserialize, Serialize};

use crate::error::ProofError;
use crate::types::hash::Hash;
use crate::verification::hasher::{hash_internal, hash_leaf};

/// A node of the binary sparse Merkle trie, as carried in a non-membership proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum Node {
    Internal(InternalNode),
    Leaf(LeafNode),
}

/// An internal node. A missing child means that subtree is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InternalNode {
    pub left_hash: Option<Hash>,
    pub right_hash: Option<Hash>,
}

/// A leaf node, committing to the hashes of a key and its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafNode {
    pub key_hash: Hash,
    pub value_hash: Hash,
}

impl InternalNode {
    pub fn hash(&self) -> Hash {
        hash_internal(self.left_hash.as_ref(), self.right_hash.as_ref())
    }

    /// The child on the given side: `false` is left, `true` is right.
    pub fn child(&self, right: bool) -> Option<&Hash> {
        if right {
            self.right_hash.as_ref()
        } else {
            self.left_hash.as_ref()
        }
    }
}

impl LeafNode {
    pub fn hash(&self) -> Hash {
        hash_leaf(&self.key_hash, &self.value_hash)
    }
}

impl Node {
    pub fn hash(&self) -> Hash {
        match self {
            Node::Internal(internal) => internal.hash(),
            Node::Leaf(leaf) => leaf.hash(),
        }
    }
}

/// Wire form of [`Node`]: two optional fields, exactly one of which must be set.
///
/// Untrusted input is decoded into this shape first, with hashes still as
/// base64 text, so that the tag check runs before any hash is decoded and a
/// bad hash length keeps its own error kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<RawInternalNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf: Option<RawLeafNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInternalNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_hash: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLeafNode {
    pub key_hash: String,
    pub value_hash: String,
}

impl RawNode {
    /// Check that exactly one of `internal` and `leaf` is populated.
    pub fn validate(&self) -> Result<(), ProofError> {
        if self.internal.is_some() == self.leaf.is_some() {
            return Err(ProofError::malformed(
                "node must be exactly one of internal or leaf",
            ));
        }
        Ok(())
    }
}

pub(crate) fn decode_optional(encoded: Option<&str>) -> Result<Option<Hash>, ProofError> {
    encoded.map(Hash::from_base64).transpose()
}

impl TryFrom<RawNode> for Node {
    type Error = ProofError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        raw.validate()?;
        match (raw.internal, raw.leaf) {
            (Some(internal), None) => Ok(Node::Internal(InternalNode {
                left_hash: decode_optional(internal.left_hash.as_deref())?,
                right_hash: decode_optional(internal.right_hash.as_deref())?,
            })),
            (None, Some(leaf)) => Ok(Node::Leaf(LeafNode {
                key_hash: Hash::from_base64(&leaf.key_hash)?,
                value_hash: Hash::from_base64(&leaf.value_hash)?,
            })),
            // validate() rejected every other shape
            _ => Err(ProofError::malformed(
                "node must be exactly one of internal or leaf",
            )),
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Internal(internal) => RawNode {
                internal: Some(RawInternalNode {
                    left_hash: internal.left_hash.map(|h| h.to_base64()),
                    right_hash: internal.right_hash.map(|h| h.to_base64()),
                }),
                leaf: None,
            },
            Node::Leaf(leaf) => RawNode {
                internal: None,
                leaf: Some(RawLeafNode {
                    key_hash: leaf.key_hash.to_base64(),
                    value_hash: leaf.value_hash.to_base64(),
                }),
            },
        }
    }
}
