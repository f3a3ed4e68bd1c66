//! The staking engine.
//!
//! Tracks which breakfast foods tokens are staked, by whom, and since when,
//! and quantizes elapsed time into whole 24-hour reward periods. Rewards are
//! minted through the coin ledger under the engine's own principal address;
//! token ownership is consulted through the registry. Both collaborators are
//! reached through trait seams so the host wires them in.

pub mod engine;
pub mod error;
pub mod record;
pub mod traits;

pub use engine::StakingEngine;
pub use error::StakingError;
pub use record::StakeRecord;
pub use traits::{RewardMinter, TokenOwnership};
