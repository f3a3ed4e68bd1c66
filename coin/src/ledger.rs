//! The breakfast coin balance ledger.

use crate::error::CoinError;
use crate::minters::MinterSet;
use breakfast_types::{Address, CoinAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Balance-tracking ledger for the breakfast coin.
///
/// Minting is gated by the embedded `MinterSet`; nothing else mutates
/// balances. Name and symbol are fixed at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoinLedger {
    name: String,
    symbol: String,
    minters: MinterSet,
    balances: HashMap<Address, CoinAmount>,
}

impl CoinLedger {
    pub const NAME: &'static str = "BreakfastCoin";
    pub const SYMBOL: &'static str = "BRKFST";

    /// Create the ledger; `deployer` becomes the initial authorized minter.
    pub fn new(deployer: Address) -> Self {
        Self {
            name: Self::NAME.to_string(),
            symbol: Self::SYMBOL.to_string(),
            minters: MinterSet::new(deployer),
            balances: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Add an address to the authorized-minter set.
    pub fn add_minting_address(&mut self, address: Address) {
        self.minters.add(address);
    }

    /// Whether an address is an authorized minter.
    pub fn can_mint(&self, address: &Address) -> bool {
        self.minters.can_mint(address)
    }

    /// Mint `amount` raw units into `to`'s balance.
    ///
    /// Fails with `Unauthorized` unless `caller` is an authorized minter.
    /// The balance is validated before it is written, so a failure leaves
    /// the ledger untouched.
    pub fn mint_to_address(
        &mut self,
        caller: &Address,
        amount: CoinAmount,
        to: &Address,
    ) -> Result<(), CoinError> {
        self.minters.require_minter(caller)?;
        let current = self.balance_of(to);
        let updated = current.checked_add(amount).ok_or(CoinError::Overflow)?;
        self.balances.insert(to.clone(), updated);
        Ok(())
    }

    /// Iterate the authorized minters in address order.
    pub fn minter_addresses(&self) -> impl Iterator<Item = &Address> {
        self.minters.iter()
    }

    /// Iterate all non-default balances.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, CoinAmount)> {
        self.balances.iter().map(|(a, b)| (a, *b))
    }

    /// Current balance; zero for unknown addresses.
    pub fn balance_of(&self, address: &Address) -> CoinAmount {
        self.balances
            .get(address)
            .copied()
            .unwrap_or(CoinAmount::ZERO)
    }
}
