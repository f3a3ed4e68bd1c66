//! Coin ledger errors.
//!
//! Messages are part of the contract surface: downstream integrations match
//! on them verbatim.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoinError {
    #[error("Feature only available to minting addresses")]
    Unauthorized,

    #[error("arithmetic overflow in coin balance")]
    Overflow,
}
