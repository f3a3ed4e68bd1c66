//! Node-level errors.

use breakfast_coin::CoinError;
use breakfast_staking::StakingError;
use breakfast_tokens::TokenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Staking(#[from] StakingError),

    #[error(transparent)]
    Coin(#[from] CoinError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("snapshot hash does not match its content")]
    SnapshotCorrupt,

    #[error("snapshot encoding failed: {0}")]
    SnapshotEncoding(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
