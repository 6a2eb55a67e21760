use std::fmt;

use serde::{Deserialize, Serialize};

/// A block height qualified by its revision (chain upgrade) number.
/// Heights order by revision first, then by height within the revision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Height {
    pub revision_number: u64,
    pub revision_height: u64,
}

impl Height {
    pub const fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    /// The height `blocks` later in the same revision, saturating at `u64::MAX`.
    pub fn add_blocks(&self, blocks: u64) -> Self {
        Self::new(
            self.revision_number,
            self.revision_height.saturating_add(blocks),
        )
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}
