//! Token registry errors.
//!
//! Messages are part of the contract surface: downstream integrations match
//! on them verbatim.

use breakfast_types::TokenId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token does not exist")]
    NotFound(TokenId),

    #[error("Token supply cap met")]
    SupplyCapReached,
}
