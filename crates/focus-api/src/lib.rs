//! Wire types for the focusd HTTP API
//!
//! This crate defines the stable JSON contract between focusd and its
//! clients (desktop UI, browser extension):
//! - Requests (start a session, report website usage)
//! - Status snapshots
//! - History and statistics records
//!
//! All bodies use camelCase field names.

mod requests;
mod types;

pub use requests::*;
pub use types::*;

/// Current API version
pub const API_VERSION: u32 = 1;
