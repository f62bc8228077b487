//! Foreground sampler interfaces for focusd
//!
//! This crate defines the interface between the session engine and the
//! platform code that reports which application currently has focus. It
//! contains no platform code itself.

mod mock;
mod traits;

pub use mock::*;
pub use traits::*;
