use std::collections::HashMap;

use crate::consensus_state::ConsensusState;
use crate::height::Height;

/// Read access to the client's per-height records, owned by the host.
pub trait ClientStore {
    fn consensus_state(&self, height: Height) -> Option<ConsensusState>;

    /// Host block time (unix nanos) at which the consensus state for `height` was stored.
    fn processed_time(&self, height: Height) -> Option<u64>;

    /// Host height at which the consensus state for `height` was stored.
    fn processed_height(&self, height: Height) -> Option<Height>;
}

/// An in-memory [`ClientStore`], for tests and hosts without their own storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    consensus_states: HashMap<Height, ConsensusState>,
    processed: HashMap<Height, (u64, Height)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_consensus_state(&mut self, height: Height, state: ConsensusState) {
        self.consensus_states.insert(height, state);
    }

    /// Record when (host time and height) the consensus state for `height` was processed.
    pub fn insert_processed(&mut self, height: Height, time: u64, host_height: Height) {
        self.processed.insert(height, (time, host_height));
    }
}

impl ClientStore for MemoryStore {
    fn consensus_state(&self, height: Height) -> Option<ConsensusState> {
        self.consensus_states.get(&height).cloned()
    }

    fn processed_time(&self, height: Height) -> Option<u64> {
        self.processed.get(&height).map(|(time, _)| *time)
    }

    fn processed_height(&self, height: Height) -> Option<Height> {
        self.processed.get(&height).map(|(_, host_height)| *host_height)
    }
}
