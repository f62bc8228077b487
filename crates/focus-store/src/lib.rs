//! Persistence layer for focusd
//!
//! Provides:
//! - Session history log (append-only)
//! - Aggregate focus statistics
//! - Website usage log with per-day aggregation
//! - A bounded write queue drained by a background worker

mod recorder;
mod sqlite;
mod traits;
mod usage;

pub use recorder::*;
pub use sqlite::*;
pub use traits::*;
pub use usage::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
