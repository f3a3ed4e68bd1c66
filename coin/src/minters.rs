//! The authorized-minter set.

use crate::error::CoinError;
use breakfast_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of principals permitted to mint breakfast coins.
///
/// Membership is additive-only: there is no removal operation in the
/// observed contract surface. The deploying principal is a member from
/// construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MinterSet {
    members: BTreeSet<Address>,
}

impl MinterSet {
    /// Create the set with the deployer as the initial member.
    pub fn new(deployer: Address) -> Self {
        let mut members = BTreeSet::new();
        members.insert(deployer);
        Self { members }
    }

    /// Add an address to the set. Idempotent; deliberately unrestricted,
    /// matching the observed surface.
    pub fn add(&mut self, address: Address) {
        self.members.insert(address);
    }

    /// Whether an address is permitted to mint.
    pub fn can_mint(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    /// Guard form: fails the calling operation when `address` is absent.
    pub fn require_minter(&self, address: &Address) -> Result<(), CoinError> {
        if self.members.contains(address) {
            Ok(())
        } else {
            Err(CoinError::Unauthorized)
        }
    }

    /// Iterate members in address order.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
