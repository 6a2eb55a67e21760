//! # Bitrie Client
//!
//! Light client glue for chains that commit their state to a bitrie.
//!
//! The host supplies a base [`LightClient`] that follows the counterparty's
//! headers. [`BitrieClient`] wraps it and replaces only membership and
//! non-membership verification: after the height and delay-period checks it
//! decodes the JSON proof and hands it to `bitrie_core` together with the
//! trusted root recorded at the proof height.

pub mod client_state;
pub mod consensus_state;
pub mod delay;
pub mod error;
pub mod height;
pub mod path;
pub mod store;

/// Client type reported by [`BitrieClient`] and its consensus states.
pub const CLIENT_TYPE: &str = "xx-bitrie";

pub use client_state::{BitrieClient, LightClient, ProofQuery};
pub use consensus_state::ConsensusState;
pub use delay::{verify_delay_period_passed, DelayPeriod, HostContext};
pub use error::ClientError;
pub use height::Height;
pub use path::MerklePath;
pub use store::{ClientStore, MemoryStore};
