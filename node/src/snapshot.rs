//! State snapshots: capture the whole system at a point in time.
//!
//! A snapshot carries a deterministic Blake2b-256 hash over a canonical
//! (sorted) projection of the state tables, so a restored node can verify
//! integrity regardless of hash-map iteration order.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::path::Path;

use breakfast_coin::CoinLedger;
use breakfast_staking::StakingEngine;
use breakfast_tokens::TokenRegistry;
use breakfast_types::Timestamp;

use crate::NodeError;

/// A snapshot of the full node state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Blake2b-256 of the canonical state projection.
    pub hash: [u8; 32],
    /// Snapshot format version.
    pub version: u32,
    /// When the snapshot was taken. Not covered by the hash.
    pub created_at: Timestamp,
    /// Sequence number of the last applied operation.
    pub sequence: u64,
    pub tokens: TokenRegistry,
    pub coins: CoinLedger,
    pub staking: StakingEngine,
}

impl StateSnapshot {
    pub const VERSION: u32 = 1;

    /// Capture a snapshot of the given components.
    pub fn create(
        tokens: &TokenRegistry,
        coins: &CoinLedger,
        staking: &StakingEngine,
        sequence: u64,
        created_at: Timestamp,
    ) -> Self {
        let mut snap = Self {
            hash: [0u8; 32],
            version: Self::VERSION,
            created_at,
            sequence,
            tokens: tokens.clone(),
            coins: coins.clone(),
            staking: staking.clone(),
        };
        snap.hash = snap.compute_hash();
        snap
    }

    /// Compute the Blake2b-256 hash of this snapshot deterministically.
    ///
    /// Each table is visited in key order; `created_at` is excluded so two
    /// snapshots of identical state hash identically.
    fn compute_hash(&self) -> [u8; 32] {
        let mut hasher = Blake2b::<U32>::new();

        let mut owners: Vec<_> = self.tokens.iter().collect();
        owners.sort_by_key(|(id, _)| *id);
        for (id, owner) in owners {
            hasher.update(id.to_le_bytes());
            hasher.update(owner.as_str().as_bytes());
        }

        // Minter set iterates in address order already.
        for minter in self.coins.minter_addresses() {
            hasher.update(minter.as_str().as_bytes());
        }
        let mut balances: Vec<_> = self.coins.balances().collect();
        balances.sort_by(|a, b| a.0.cmp(b.0));
        for (address, balance) in balances {
            hasher.update(address.as_str().as_bytes());
            hasher.update(balance.raw().to_le_bytes());
        }

        let mut records: Vec<_> = self.staking.records().collect();
        records.sort_by_key(|(id, _)| *id);
        for (id, record) in records {
            hasher.update(id.to_le_bytes());
            hasher.update([record.is_staked as u8]);
            hasher.update(record.staked_by.as_str().as_bytes());
            hasher.update(record.staked_at.as_secs().to_le_bytes());
            hasher.update(record.last_withdrawal_at.as_secs().to_le_bytes());
        }

        hasher.update(self.sequence.to_le_bytes());

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches the state it carries.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, NodeError> {
        bincode::serialize(self).map_err(|e| NodeError::SnapshotEncoding(e.to_string()))
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NodeError> {
        bincode::deserialize(bytes).map_err(|e| NodeError::SnapshotEncoding(e.to_string()))
    }

    /// Write the snapshot to a file.
    pub fn write_to_file(&self, path: &Path) -> Result<(), NodeError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Read and decode a snapshot from a file. The caller still needs to
    /// `verify()` (or go through `Node::restore`, which does).
    pub fn read_from_file(path: &Path) -> Result<Self, NodeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakfast_types::{Address, StakingParams};

    fn components() -> (TokenRegistry, CoinLedger, StakingEngine) {
        let mut tokens = TokenRegistry::capped(10);
        tokens.mint(Address::new("alice")).unwrap();
        tokens.mint(Address::new("bob")).unwrap();
        let mut coins = CoinLedger::new(Address::new("deployer"));
        let mut staking =
            StakingEngine::new(StakingParams::default(), Address::new("engine"));
        coins.add_minting_address(staking.address().clone());
        staking
            .stake(&Address::new("alice"), 0, &tokens, Timestamp::new(100))
            .unwrap();
        (tokens, coins, staking)
    }

    #[test]
    fn create_and_verify() {
        let (tokens, coins, staking) = components();
        let snap = StateSnapshot::create(&tokens, &coins, &staking, 5, Timestamp::new(200));
        assert!(snap.verify());
        assert_eq!(snap.version, 1);
        assert_eq!(snap.sequence, 5);
    }

    #[test]
    fn tampered_snapshot_fails_verify() {
        let (tokens, coins, staking) = components();
        let mut snap = StateSnapshot::create(&tokens, &coins, &staking, 5, Timestamp::new(200));
        snap.sequence = 99;
        assert!(!snap.verify());
    }

    #[test]
    fn serialize_roundtrip() {
        let (tokens, coins, staking) = components();
        let snap = StateSnapshot::create(&tokens, &coins, &staking, 3, Timestamp::new(200));
        let bytes = snap.to_bytes().unwrap();
        let restored = StateSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(restored.hash, snap.hash);
        assert!(restored.verify());
        assert_eq!(restored.tokens.supply(), 2);
    }

    #[test]
    fn hash_ignores_created_at() {
        let (tokens, coins, staking) = components();
        let a = StateSnapshot::create(&tokens, &coins, &staking, 1, Timestamp::new(100));
        let b = StateSnapshot::create(&tokens, &coins, &staking, 1, Timestamp::new(999));
        assert_eq!(a.hash, b.hash);
    }
}
