//! Route handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use focus_api::{
    FocusStatus, HealthStatus, ProfileStats, SessionHistoryItem, StartFocusRequest, UsageReport,
    UsageSummary, WhitelistPreset, API_VERSION,
};
use focus_core::normalize_domain;
use focus_store::WebsiteUsage;
use tracing::debug;

use crate::{ApiError, AppState};

pub(crate) async fn start_focus(
    State(state): State<AppState>,
    Json(req): Json<StartFocusRequest>,
) -> Result<Json<FocusStatus>, ApiError> {
    let status = state.gateway.start(&req).await?;
    Ok(Json(status))
}

pub(crate) async fn stop_focus(State(state): State<AppState>) -> Json<FocusStatus> {
    Json(state.gateway.stop().await)
}

pub(crate) async fn focus_status(State(state): State<AppState>) -> Json<FocusStatus> {
    Json(state.gateway.status().await)
}

pub(crate) async fn focus_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionHistoryItem>>, ApiError> {
    Ok(Json(state.store.get_history()?))
}

/// Accepts a batch of usage slices from the browser extension. Always 200.
pub(crate) async fn report_usage(
    State(state): State<AppState>,
    Json(reports): Json<Vec<UsageReport>>,
) -> StatusCode {
    let received_at = focus_util::now().with_timezone(&Utc);

    for report in &reports {
        if !report.is_valid() {
            debug!(url = %report.url, duration = report.duration, "Skipping usage report");
            continue;
        }

        state
            .gateway
            .report_usage(&report.domain, &report.url, report.duration)
            .await;

        let domain = if report.domain.trim().is_empty() {
            normalize_domain(&report.url)
        } else {
            report.domain.trim().to_string()
        };
        state
            .writer
            .add_website_usage(WebsiteUsage::from_report(report, domain, received_at));
    }

    StatusCode::OK
}

pub(crate) async fn usage_today(
    State(state): State<AppState>,
) -> Result<Json<Vec<UsageSummary>>, ApiError> {
    let today = focus_util::now().with_timezone(&Utc).date_naive();
    Ok(Json(state.store.get_usage_for_day(today)?))
}

pub(crate) async fn profile(State(state): State<AppState>) -> Result<Json<ProfileStats>, ApiError> {
    Ok(Json(state.store.get_profile()?))
}

pub(crate) async fn presets(State(state): State<AppState>) -> Json<Vec<WhitelistPreset>> {
    Json(state.presets.as_ref().clone())
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        api_version: API_VERSION,
        store_healthy: state.store.is_healthy(),
        sampler_backend: state.gateway.sampler_backend().to_string(),
        session_active: state.gateway.has_active_session().await,
    })
}
