//! Lifecycle gateway
//!
//! Serializes every operation on the engine behind one async mutex and owns
//! the per-session ticker task. The ticker samples the foreground before it
//! takes the lock, so sampler latency never holds up other callers.

use focus_api::{FocusStatus, StartFocusRequest};
use focus_host_api::ForegroundSampler;
use focus_util::{FocusError, MonotonicInstant, SessionId};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::{CoreEvent, FocusEngine, StartDecision, StopDecision};

/// Period of the session ticker
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Longest a tick waits for the foreground sampler
pub const SAMPLE_TIMEOUT: Duration = TICK_INTERVAL;

struct GatewayState {
    engine: FocusEngine,
    ticker: Option<JoinHandle<()>>,
}

impl GatewayState {
    fn disarm_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

struct GatewayInner {
    state: Mutex<GatewayState>,
    sampler: Arc<dyn ForegroundSampler>,
}

/// Shared handle to the focus engine
#[derive(Clone)]
pub struct FocusGateway {
    inner: Arc<GatewayInner>,
}

impl FocusGateway {
    pub fn new(engine: FocusEngine, sampler: Arc<dyn ForegroundSampler>) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                state: Mutex::new(GatewayState {
                    engine,
                    ticker: None,
                }),
                sampler,
            }),
        }
    }

    pub fn sampler_backend(&self) -> &str {
        self.inner.sampler.backend_name()
    }

    /// Validate and start a session, returning the fresh status snapshot
    pub async fn start(&self, req: &StartFocusRequest) -> Result<FocusStatus, FocusError> {
        req.validate()?;

        let mut state = self.inner.state.lock().await;

        let plan = match state.engine.request_start(req) {
            StartDecision::Approved(plan) => plan,
            StartDecision::Conflict => return Err(FocusError::SessionAlreadyActive),
        };

        let session_id = plan.session_id.clone();
        state
            .engine
            .start_session(plan, MonotonicInstant::now(), focus_util::now())?;

        state.disarm_ticker();
        state.ticker = Some(spawn_ticker(Arc::downgrade(&self.inner), session_id));

        Ok(state.engine.status())
    }

    /// Stop the running session as aborted. A no-op when idle.
    pub async fn stop(&self) -> FocusStatus {
        let mut state = self.inner.state.lock().await;

        match state
            .engine
            .stop(MonotonicInstant::now(), focus_util::now())
        {
            StopDecision::Stopped(_) => state.disarm_ticker(),
            StopDecision::NoActiveSession => debug!("Stop requested with no active session"),
        }

        state.engine.status()
    }

    /// Feed a website usage report into the running session
    pub async fn report_usage(&self, domain: &str, url: &str, duration_secs: i64) {
        let mut state = self.inner.state.lock().await;

        let ended = state.engine.report_usage(
            domain,
            url,
            duration_secs,
            MonotonicInstant::now(),
            focus_util::now(),
        );

        if ended.is_some() {
            state.disarm_ticker();
        }
    }

    pub async fn status(&self) -> FocusStatus {
        self.inner.state.lock().await.engine.status()
    }

    pub async fn has_active_session(&self) -> bool {
        self.inner.state.lock().await.engine.has_active_session()
    }

    /// Abort any running session and stop the ticker
    pub async fn shutdown(&self) -> Option<CoreEvent> {
        let mut state = self.inner.state.lock().await;
        state.disarm_ticker();

        match state
            .engine
            .stop(MonotonicInstant::now(), focus_util::now())
        {
            StopDecision::Stopped(event) => {
                info!("Active session aborted for shutdown");
                Some(event)
            }
            StopDecision::NoActiveSession => None,
        }
    }
}

/// One ticker per session. It exits as soon as the session it was spawned
/// for is no longer the current one.
fn spawn_ticker(inner: Weak<GatewayInner>, session_id: SessionId) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let Some(inner) = inner.upgrade() else {
                break;
            };

            let sampled = tokio::time::timeout(SAMPLE_TIMEOUT, inner.sampler.sample()).await;
            let sample = match sampled {
                Ok(sample) => sample,
                Err(_) => {
                    debug!(
                        backend = inner.sampler.backend_name(),
                        "Foreground sample timed out"
                    );
                    None
                }
            };

            let mut state = inner.state.lock().await;
            if state.engine.current_session_id() != Some(&session_id) {
                break;
            }

            let events = state
                .engine
                .tick(MonotonicInstant::now(), focus_util::now(), sample.as_deref());

            for event in &events {
                match event {
                    CoreEvent::ProcessViolationStarted { process, .. } => info!(
                        session_id = %session_id,
                        process = %process,
                        "Non-whitelisted process in foreground"
                    ),
                    CoreEvent::SessionEnded { outcome, .. } => {
                        debug!(session_id = %session_id, outcome = %outcome, "Tick ended session");
                    }
                }
            }

            if !state.engine.has_active_session() {
                // Dropping our own handle detaches; the task ends right after.
                state.ticker = None;
                break;
            }
        }

        debug!(session_id = %session_id, "Ticker stopped");
    })
}
