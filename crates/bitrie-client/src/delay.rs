use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;
use crate::height::Height;
use crate::store::ClientStore;

/// How long a consensus state must have been known before proofs against it are accepted.
/// Zero in either field disables that half of the check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayPeriod {
    /// Nanoseconds of host block time.
    pub time: u64,
    /// Host blocks.
    pub blocks: u64,
}

impl DelayPeriod {
    pub const NONE: DelayPeriod = DelayPeriod { time: 0, blocks: 0 };
}

/// The host chain's view of "now" during a verification call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    /// Current block time, in nanoseconds since the Unix epoch.
    pub block_time: u64,
    pub height: Height,
}

/// Check that the delay period has elapsed since the consensus state for
/// `proof_height` was processed. Both bounds are inclusive: reaching the
/// valid time or height exactly is enough.
pub fn verify_delay_period_passed(
    ctx: &HostContext,
    store: &dyn ClientStore,
    proof_height: Height,
    delay: DelayPeriod,
) -> Result<(), ClientError> {
    if delay.time != 0 {
        let processed_time = store
            .processed_time(proof_height)
            .ok_or(ClientError::ProcessedTimeNotFound {
                height: proof_height,
            })?;

        let valid_time = processed_time.saturating_add(delay.time);
        if ctx.block_time < valid_time {
            debug!(valid_time, current_time = ctx.block_time, "delay time period not passed");
            return Err(ClientError::DelayTimeNotPassed {
                valid_time,
                current_time: ctx.block_time,
            });
        }
    }

    if delay.blocks != 0 {
        let processed_height = store
            .processed_height(proof_height)
            .ok_or(ClientError::ProcessedHeightNotFound {
                height: proof_height,
            })?;

        let valid_height = processed_height.add_blocks(delay.blocks);
        if ctx.height < valid_height {
            debug!(%valid_height, current_height = %ctx.height, "delay block period not passed");
            return Err(ClientError::DelayBlocksNotPassed {
                valid_height,
                current_height: ctx.height,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const PROOF_HEIGHT: Height = Height::new(1, 50);

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_processed(PROOF_HEIGHT, 1_000, Height::new(0, 200));
        store
    }

    fn ctx(block_time: u64, height: u64) -> HostContext {
        HostContext {
            block_time,
            height: Height::new(0, height),
        }
    }

    #[test]
    fn test_no_delay_needs_no_records() {
        let empty = MemoryStore::new();
        assert_eq!(
            verify_delay_period_passed(&ctx(0, 0), &empty, PROOF_HEIGHT, DelayPeriod::NONE),
            Ok(())
        );
    }

    #[test]
    fn test_time_delay_is_inclusive() {
        let delay = DelayPeriod { time: 500, blocks: 0 };
        assert_eq!(
            verify_delay_period_passed(&ctx(1_500, 0), &store(), PROOF_HEIGHT, delay),
            Ok(())
        );
        assert_eq!(
            verify_delay_period_passed(&ctx(1_499, 0), &store(), PROOF_HEIGHT, delay),
            Err(ClientError::DelayTimeNotPassed {
                valid_time: 1_500,
                current_time: 1_499,
            })
        );
    }

    #[test]
    fn test_block_delay_is_inclusive() {
        let delay = DelayPeriod { time: 0, blocks: 10 };
        assert_eq!(
            verify_delay_period_passed(&ctx(0, 210), &store(), PROOF_HEIGHT, delay),
            Ok(())
        );
        assert_eq!(
            verify_delay_period_passed(&ctx(0, 209), &store(), PROOF_HEIGHT, delay),
            Err(ClientError::DelayBlocksNotPassed {
                valid_height: Height::new(0, 210),
                current_height: Height::new(0, 209),
            })
        );
    }

    #[test]
    fn test_missing_records() {
        let empty = MemoryStore::new();
        assert_eq!(
            verify_delay_period_passed(
                &ctx(0, 0),
                &empty,
                PROOF_HEIGHT,
                DelayPeriod { time: 1, blocks: 0 }
            ),
            Err(ClientError::ProcessedTimeNotFound {
                height: PROOF_HEIGHT
            })
        );
        assert_eq!(
            verify_delay_period_passed(
                &ctx(0, 0),
                &empty,
                PROOF_HEIGHT,
                DelayPeriod { time: 0, blocks: 1 }
            ),
            Err(ClientError::ProcessedHeightNotFound {
                height: PROOF_HEIGHT
            })
        );
    }
}
