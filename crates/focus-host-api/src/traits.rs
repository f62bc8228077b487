//! Foreground sampler traits

use async_trait::async_trait;
use thiserror::Error;

/// Errors from sampler backends
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Unexpected output: {0}")]
    Parse(String),

    #[error("No focused window")]
    NoFocusedWindow,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HostResult<T> = Result<T, HostError>;

/// Reports the application that currently has input focus.
///
/// Sampling is best-effort: any failure is reported as `None`, which the
/// engine treats as "no violation this tick".
#[async_trait]
pub trait ForegroundSampler: Send + Sync {
    /// Process name of the focused application, as the platform reports it
    async fn sample(&self) -> Option<String>;

    /// Short backend identifier for logs and the health endpoint
    fn backend_name(&self) -> &str;
}

/// Sampler that never reports a foreground process
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSampler;

#[async_trait]
impl ForegroundSampler for NullSampler {
    async fn sample(&self) -> Option<String> {
        None
    }

    fn backend_name(&self) -> &str {
        "none"
    }
}
