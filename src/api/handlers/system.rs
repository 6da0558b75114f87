//! System endpoints: portal liveness.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Liveness snapshot of the running portal.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    /// Fixed `"healthy"` marker.
    status: String,
    /// Crate version.
    version: String,
    /// Time the snapshot was taken.
    timestamp: String,
    /// Accounts currently in the registry (0 before the first login,
    /// 1 afterwards for this single-tenant portal).
    accounts: usize,
    /// Live event-bus receivers (WebSocket clients plus the telemetry
    /// recorder when enabled).
    event_subscribers: usize,
    /// Total domain events published since startup.
    events_published: u64,
}

/// `GET /health` — Portal liveness and event-stream counters.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Reports liveness plus registry and event-stream counters: account count, live event subscribers, and the number of domain events published since startup.",
    responses(
        (status = 200, description = "Portal is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
            accounts: state.economy.registry().len().await,
            event_subscribers: state.event_bus.receiver_count(),
            events_published: state.event_bus.last_seq(),
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
