//! The public operation surface as data.
//!
//! Every state-mutating call is captured as an `Operation`; the node stamps
//! it with a sequence number and the admission timestamp and appends it to
//! the applied log. The log is the exogenous total order: replaying it
//! against a fresh node reproduces the state.

use breakfast_types::{Address, CoinAmount, Timestamp, TokenId};
use serde::{Deserialize, Serialize};

/// A state-mutating operation on the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Stake { caller: Address, token_id: TokenId },
    Unstake { caller: Address, token_id: TokenId },
    WithdrawBreakfastCoins { token_id: TokenId },
    MintToken { caller: Address },
    AddMintingAddress { address: Address },
    MintToAddress {
        caller: Address,
        amount: CoinAmount,
        to: Address,
    },
}

impl Operation {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stake { .. } => "stake",
            Self::Unstake { .. } => "unstake",
            Self::WithdrawBreakfastCoins { .. } => "withdraw_breakfast_coins",
            Self::MintToken { .. } => "mint_token",
            Self::AddMintingAddress { .. } => "add_minting_address",
            Self::MintToAddress { .. } => "mint_to_address",
        }
    }
}

/// A successfully applied operation, as recorded in the log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppliedOperation {
    /// Position in the global order, starting at 1.
    pub sequence: u64,
    /// Clock reading at admission; every timestamp the operation used.
    pub timestamp: Timestamp,
    pub operation: Operation,
}

/// Result of applying an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Receipt {
    /// No value beyond success.
    Done,
    /// A token was minted with this id.
    TokenMinted(TokenId),
    /// Rewards were minted for this many raw units.
    CoinsMinted(CoinAmount),
}
