//! Protocol parameters for staking and reward accrual.

use crate::amount::{CoinAmount, COIN_UNIT};
use serde::{Deserialize, Serialize};

/// Parameters governing reward accrual and token supply.
///
/// The defaults are the observed protocol constants: one 24-hour reward
/// period, 10 whole coins per period per staked token, and a 10-token
/// supply cap on the capped registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingParams {
    /// Length of one reward period in seconds. Accrual is quantized to
    /// whole periods; no partial-period rewards are ever minted.
    #[serde(default = "default_reward_period")]
    pub reward_period_secs: u64,

    /// Reward (raw units) minted per fully elapsed period per staked token.
    #[serde(default = "default_unit_reward")]
    pub unit_reward: CoinAmount,

    /// Supply cap for the capped token registry.
    #[serde(default = "default_max_supply")]
    pub max_token_supply: u64,
}

fn default_reward_period() -> u64 {
    StakingParams::REWARD_PERIOD_SECS
}

fn default_unit_reward() -> CoinAmount {
    CoinAmount::new(StakingParams::UNIT_REWARD_RAW)
}

fn default_max_supply() -> u64 {
    StakingParams::MAX_TOKEN_SUPPLY
}

impl StakingParams {
    /// One reward period: 24 hours.
    pub const REWARD_PERIOD_SECS: u64 = 86_400;

    /// 10 whole coins per period.
    pub const UNIT_REWARD_RAW: u128 = 10 * COIN_UNIT;

    /// Observed cap on the capped registry.
    pub const MAX_TOKEN_SUPPLY: u64 = 10;

    pub fn protocol_defaults() -> Self {
        Self {
            reward_period_secs: Self::REWARD_PERIOD_SECS,
            unit_reward: CoinAmount::new(Self::UNIT_REWARD_RAW),
            max_token_supply: Self::MAX_TOKEN_SUPPLY,
        }
    }
}

impl Default for StakingParams {
    fn default() -> Self {
        Self::protocol_defaults()
    }
}
