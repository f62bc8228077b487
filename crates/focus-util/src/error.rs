//! Error types for focusd

use thiserror::Error;

/// Errors surfaced to callers of the focus engine
#[derive(Debug, Error)]
pub enum FocusError {
    #[error("{0}")]
    Validation(String),

    #[error("A focus session is already running")]
    SessionAlreadyActive,
}

impl FocusError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
