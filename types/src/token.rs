//! Token identifiers.

/// Unique identifier for a breakfast foods token.
///
/// Ids are allocated sequentially by the token registry, starting at 0.
pub type TokenId = u64;
