//! The token ownership registry.

use crate::error::TokenError;
use breakfast_types::{Address, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tracks existence and ownership of breakfast foods tokens.
///
/// Ids are allocated sequentially from 0; each token has exactly one owner
/// and is never destroyed. A capped registry refuses to mint past its
/// supply cap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenRegistry {
    name: String,
    symbol: String,
    owners: HashMap<TokenId, Address>,
    next_id: TokenId,
    max_supply: Option<u64>,
}

impl TokenRegistry {
    pub const NAME: &'static str = "BreakfastFoods";
    pub const SYMBOL: &'static str = "BRKFST";

    /// An uncapped registry.
    pub fn new() -> Self {
        Self {
            name: Self::NAME.to_string(),
            symbol: Self::SYMBOL.to_string(),
            owners: HashMap::new(),
            next_id: 0,
            max_supply: None,
        }
    }

    /// A registry that refuses to mint once `max_supply` tokens exist.
    pub fn capped(max_supply: u64) -> Self {
        Self {
            max_supply: Some(max_supply),
            ..Self::new()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Allocate the next sequential id and assign it to `recipient`.
    pub fn mint(&mut self, recipient: Address) -> Result<TokenId, TokenError> {
        if let Some(cap) = self.max_supply {
            if self.supply() >= cap {
                return Err(TokenError::SupplyCapReached);
            }
        }
        let id = self.next_id;
        self.owners.insert(id, recipient);
        self.next_id += 1;
        Ok(id)
    }

    /// Current owner of a token; fails for never-minted ids.
    pub fn owner_of(&self, token_id: TokenId) -> Result<&Address, TokenError> {
        self.owners
            .get(&token_id)
            .ok_or(TokenError::NotFound(token_id))
    }

    /// Whether a token has been minted.
    pub fn exists(&self, token_id: TokenId) -> bool {
        self.owners.contains_key(&token_id)
    }

    /// Iterate all tokens and their owners.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Address)> {
        self.owners.iter().map(|(id, owner)| (*id, owner))
    }

    /// Number of tokens minted so far.
    pub fn supply(&self) -> u64 {
        self.next_id
    }

    pub fn max_supply(&self) -> Option<u64> {
        self.max_supply
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    #[test]
    fn identity_is_fixed() {
        let registry = TokenRegistry::new();
        assert_eq!(registry.name(), "BreakfastFoods");
        assert_eq!(registry.symbol(), "BRKFST");
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut registry = TokenRegistry::new();
        assert_eq!(registry.mint(addr("alice")).unwrap(), 0);
        assert_eq!(registry.mint(addr("bob")).unwrap(), 1);
        assert_eq!(registry.supply(), 2);
    }

    #[test]
    fn owner_of_tracks_recipient() {
        let mut registry = TokenRegistry::new();
        let id = registry.mint(addr("alice")).unwrap();
        assert_eq!(registry.owner_of(id).unwrap(), &addr("alice"));
    }

    #[test]
    fn owner_of_unknown_token_fails() {
        let registry = TokenRegistry::new();
        let err = registry.owner_of(7).unwrap_err();
        assert_eq!(err, TokenError::NotFound(7));
        assert_eq!(err.to_string(), "Token does not exist");
    }

    #[test]
    fn cap_is_enforced_on_the_next_mint() {
        let mut registry = TokenRegistry::capped(10);
        for expected in 0..10 {
            assert_eq!(registry.mint(addr("minter")).unwrap(), expected);
        }
        let err = registry.mint(addr("minter")).unwrap_err();
        assert_eq!(err, TokenError::SupplyCapReached);
        assert_eq!(err.to_string(), "Token supply cap met");
        assert_eq!(registry.supply(), 10);
    }

    #[test]
    fn uncapped_registry_keeps_minting() {
        let mut registry = TokenRegistry::new();
        for _ in 0..100 {
            registry.mint(addr("minter")).unwrap();
        }
        assert_eq!(registry.supply(), 100);
    }
}
