//! Breakfast coin: the fungible reward asset.
//!
//! Two components live here:
//! - `MinterSet`: the authorization registry deciding who may mint.
//! - `CoinLedger`: address balances, with minting gated by the `MinterSet`.

pub mod error;
pub mod ledger;
pub mod minters;

pub use error::CoinError;
pub use ledger::CoinLedger;
pub use minters::MinterSet;
