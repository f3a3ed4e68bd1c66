//! Breakfast foods tokens: the unique-asset ownership registry.

pub mod error;
pub mod registry;

pub use error::TokenError;
pub use registry::TokenRegistry;
