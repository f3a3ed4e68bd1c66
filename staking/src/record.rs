//! Per-token stake state.

use breakfast_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};

/// Staking state for a single token id.
///
/// When `is_staked` is false the remaining fields are stale and ignored;
/// a re-stake overwrites them with fresh values. `staked_by` deliberately
/// survives an unstake, matching the observed contract surface (a former
/// staker may issue a redundant unstake without error).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    pub is_staked: bool,
    pub staked_by: Address,
    pub staked_at: Timestamp,
    pub last_withdrawal_at: Timestamp,
}

impl StakeRecord {
    /// A fresh record opened at stake time. Both clocks start at `now`.
    pub fn opened(staked_by: Address, now: Timestamp) -> Self {
        Self {
            is_staked: true,
            staked_by,
            staked_at: now,
            last_withdrawal_at: now,
        }
    }
}
