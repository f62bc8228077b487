//! Shared utilities for focusd
//!
//! This crate provides:
//! - ID types (SessionId)
//! - Time utilities (monotonic time, rounding helpers, mockable wall clock)
//! - Error types
//! - Default paths for config and data directories

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
