//! Trait seams for the engine's injected collaborators.
//!
//! The engine never owns token or coin state; the host passes capabilities
//! in per call. Concrete implementations live on `TokenRegistry` and
//! `CoinLedger`.

use breakfast_coin::{CoinError, CoinLedger};
use breakfast_tokens::{TokenError, TokenRegistry};
use breakfast_types::{Address, CoinAmount, TokenId};

/// Read-only view of token existence and ownership.
pub trait TokenOwnership {
    /// Current owner of a token; fails for never-minted ids.
    fn owner_of(&self, token_id: TokenId) -> Result<&Address, TokenError>;
}

impl TokenOwnership for TokenRegistry {
    fn owner_of(&self, token_id: TokenId) -> Result<&Address, TokenError> {
        TokenRegistry::owner_of(self, token_id)
    }
}

/// Capability to request reward mints. The minting `caller` is checked
/// against the authorized-minter set by the implementation.
pub trait RewardMinter {
    fn mint_to_address(
        &mut self,
        caller: &Address,
        amount: CoinAmount,
        to: &Address,
    ) -> Result<(), CoinError>;
}

impl RewardMinter for CoinLedger {
    fn mint_to_address(
        &mut self,
        caller: &Address,
        amount: CoinAmount,
        to: &Address,
    ) -> Result<(), CoinError> {
        CoinLedger::mint_to_address(self, caller, amount, to)
    }
}
