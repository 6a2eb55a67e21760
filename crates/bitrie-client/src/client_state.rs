use bitrie_core::{Hash, Proof};
use tracing::{debug, instrument};

use crate::delay::{verify_delay_period_passed, DelayPeriod, HostContext};
use crate::error::ClientError;
use crate::height::Height;
use crate::path::MerklePath;
use crate::store::ClientStore;
use crate::CLIENT_TYPE;

/// Arguments shared by membership and non-membership verification.
#[derive(Clone, Copy, Debug)]
pub struct ProofQuery<'a> {
    /// Height of the consensus state the proof was built against.
    pub height: Height,
    pub delay: DelayPeriod,
    /// The proof as received, still encoded.
    pub proof: &'a [u8],
    pub path: &'a MerklePath,
}

/// The light client surface a host calls into.
///
/// Header updates, misbehaviour and expiry belong to whichever implementation
/// the host supplies; this crate only needs the pieces below.
pub trait LightClient {
    fn client_type(&self) -> &str;

    fn latest_height(&self) -> Height;

    fn verify_membership(
        &self,
        ctx: &HostContext,
        store: &dyn ClientStore,
        query: &ProofQuery<'_>,
        value: &[u8],
    ) -> Result<(), ClientError>;

    fn verify_non_membership(
        &self,
        ctx: &HostContext,
        store: &dyn ClientStore,
        query: &ProofQuery<'_>,
    ) -> Result<(), ClientError>;
}

/// A light client that tracks the chain with a base client and checks
/// state proofs as bitrie proofs.
///
/// Everything except `client_type` and the two verification calls is
/// delegated to `base`.
#[derive(Clone, Debug)]
pub struct BitrieClient<B> {
    base: B,
}

impl<B: LightClient> BitrieClient<B> {
    pub fn new(base: B) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn into_inner(self) -> B {
        self.base
    }

    /// Checks shared by both verification calls: height, delay period, proof
    /// decoding, path, and the trusted root at the proof height.
    fn prepare(
        &self,
        ctx: &HostContext,
        store: &dyn ClientStore,
        query: &ProofQuery<'_>,
    ) -> Result<(Proof, Hash), ClientError> {
        let latest = self.base.latest_height();
        if latest < query.height {
            return Err(ClientError::InvalidHeight {
                latest,
                proof: query.height,
            });
        }

        verify_delay_period_passed(ctx, store, query.height, query.delay)?;

        let proof = decode_proof(query.proof)?;

        if query.path.is_empty() {
            return Err(ClientError::EmptyPath);
        }

        let consensus_state =
            store
                .consensus_state(query.height)
                .ok_or(ClientError::ConsensusStateNotFound {
                    height: query.height,
                })?;

        Ok((proof, consensus_state.root))
    }
}

/// Decode a JSON proof. Bytes that are not JSON of the right shape are an
/// invalid proof; structural problems keep their own error kinds.
fn decode_proof(bytes: &[u8]) -> Result<Proof, ClientError> {
    let raw: bitrie_core::types::RawProof =
        serde_json::from_slice(bytes).map_err(|e| ClientError::InvalidProof {
            reason: format!("failed to unmarshal proof into bitrie proof: {e}"),
        })?;
    Ok(Proof::try_from(raw)?)
}

impl<B: LightClient> LightClient for BitrieClient<B> {
    fn client_type(&self) -> &str {
        CLIENT_TYPE
    }

    fn latest_height(&self) -> Height {
        self.base.latest_height()
    }

    #[instrument(skip_all, fields(height = %query.height))]
    fn verify_membership(
        &self,
        ctx: &HostContext,
        store: &dyn ClientStore,
        query: &ProofQuery<'_>,
        value: &[u8],
    ) -> Result<(), ClientError> {
        let (proof, root) = self.prepare(ctx, store, query)?;

        bitrie_core::verify_membership(&root, query.path.as_ref(), value, &proof).map_err(|e| {
            debug!(error = %e, code = e.code(), "membership proof rejected");
            ClientError::from(e)
        })
    }

    #[instrument(skip_all, fields(height = %query.height))]
    fn verify_non_membership(
        &self,
        ctx: &HostContext,
        store: &dyn ClientStore,
        query: &ProofQuery<'_>,
    ) -> Result<(), ClientError> {
        let (proof, root) = self.prepare(ctx, store, query)?;

        bitrie_core::verify_non_membership(&root, query.path.as_ref(), &proof).map_err(|e| {
            debug!(error = %e, code = e.code(), "non-membership proof rejected");
            ClientError::from(e)
        })
    }
}
