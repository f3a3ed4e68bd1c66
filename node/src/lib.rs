//! The host for the breakfast staking system.
//!
//! Owns every component's state, applies the public operation surface as
//! indivisible, sequentially numbered transactions, reads the clock once
//! per operation, and persists verified snapshots.

pub mod clock;
pub mod config;
pub mod error;
pub mod node;
pub mod operations;
pub mod snapshot;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::NodeConfig;
pub use error::NodeError;
pub use node::Node;
pub use operations::{AppliedOperation, Operation, Receipt};
pub use snapshot::StateSnapshot;
