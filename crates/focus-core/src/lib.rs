//! Core focus engine for focusd
//!
//! This crate contains:
//! - Whitelist normalization and membership
//! - The two violation trackers (contiguous process, cumulative website)
//! - The session state machine
//! - The lifecycle gateway that serializes access and drives the ticker

mod engine;
mod events;
mod gateway;
mod session;
mod violation;
mod whitelist;

#[cfg(test)]
mod testing;

pub use engine::*;
pub use events::*;
pub use gateway::*;
pub use session::*;
pub use violation::*;
pub use whitelist::*;
