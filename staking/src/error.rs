//! Staking engine errors.
//!
//! Messages are part of the contract surface: downstream integrations match
//! on them verbatim. Collaborator failures (`Token does not exist`,
//! `Feature only available to minting addresses`) pass through unchanged.

use breakfast_coin::CoinError;
use breakfast_tokens::TokenError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StakingError {
    #[error("Token not owned by this address")]
    NotOwner,

    #[error("Token not staked by this address")]
    WrongStaker,

    #[error("Token not staked")]
    NotStaked,

    #[error("Can only withdraw coins every 24 hours")]
    CooldownNotElapsed,

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Coin(#[from] CoinError),
}
