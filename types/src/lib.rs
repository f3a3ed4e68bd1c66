//! Fundamental types for the breakfast staking system.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, token ids, coin amounts, timestamps, and the
//! protocol parameters.

pub mod address;
pub mod amount;
pub mod params;
pub mod time;
pub mod token;

pub use address::Address;
pub use amount::{CoinAmount, COIN_UNIT};
pub use params::StakingParams;
pub use time::Timestamp;
pub use token::TokenId;
