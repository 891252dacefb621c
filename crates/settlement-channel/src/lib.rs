//! multi-party state-channel settlement
//!
//! participants escrow tokens under a channel, compute balance updates off
//! the settlement layer, and close by presenting a proof of a valid final
//! state plus a threshold signature. each participant then withdraws their
//! settled balance exactly once. a timeout fallback lets participants recover
//! their own deposits when the leader never closes.

pub mod bank;
pub mod bond;
pub mod channel;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod machine;
pub mod registry;
pub mod types;
pub mod withdrawal;

pub use bank::*;
pub use bond::*;
pub use channel::*;
pub use error::*;
pub use gateway::*;
pub use ledger::*;
pub use machine::*;
pub use registry::*;
pub use types::*;
pub use withdrawal::*;
