//! Mock sampler for testing

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::ForegroundSampler;

/// Scripted sampler for unit/integration testing.
///
/// Each call pops the next scripted sample; once the script is exhausted the
/// fallback value is returned forever.
#[derive(Debug, Default)]
pub struct MockSampler {
    script: Mutex<VecDeque<Option<String>>>,
    fallback: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MockSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampler that always reports `process`
    pub fn fixed(process: impl Into<String>) -> Self {
        let sampler = Self::new();
        sampler.set_fallback(Some(process.into()));
        sampler
    }

    /// Queue samples to be returned in order
    pub fn push_samples<I, S>(&self, samples: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        script.extend(samples.into_iter().map(|s| s.map(Into::into)));
    }

    /// Change what is returned once the script runs out
    pub fn set_fallback(&self, process: Option<String>) {
        *self.fallback.lock().unwrap_or_else(PoisonError::into_inner) = process;
    }

    /// Number of times `sample` has been called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForegroundSampler for MockSampler {
    async fn sample(&self) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match scripted {
            Some(sample) => sample,
            None => self
                .fallback
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_script_then_fallback() {
        let sampler = MockSampler::fixed("code");
        sampler.push_samples([Some("notepad.exe"), None]);

        assert_eq!(sampler.sample().await.as_deref(), Some("notepad.exe"));
        assert_eq!(sampler.sample().await, None);
        assert_eq!(sampler.sample().await.as_deref(), Some("code"));
        assert_eq!(sampler.sample().await.as_deref(), Some("code"));
        assert_eq!(sampler.calls(), 4);
    }

    #[tokio::test]
    async fn mock_default_is_absent() {
        let sampler = MockSampler::new();
        assert_eq!(sampler.sample().await, None);

        sampler.set_fallback(Some("firefox".into()));
        assert_eq!(sampler.sample().await.as_deref(), Some("firefox"));
    }
}
