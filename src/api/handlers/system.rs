//! System endpoints: health check and event-type catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::HookEventType;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Observable event kind info.
#[derive(Debug, Serialize, ToSchema)]
struct EventTypeInfo {
    event_type: &'static str,
    description: &'static str,
}

/// `GET /config/event-types` — List observable event kinds.
#[utoipa::path(
    get,
    path = "/config/event-types",
    tag = "System",
    summary = "List observable event kinds",
    description = "Returns every event kind a hook can subscribe to.",
    responses(
        (status = 200, description = "Event kind catalog", body = Vec<EventTypeInfo>),
    )
)]
pub async fn event_types_handler() -> impl IntoResponse {
    let types: Vec<EventTypeInfo> = HookEventType::all()
        .into_iter()
        .map(|kind| EventTypeInfo {
            event_type: kind.as_str(),
            description: match kind {
                HookEventType::Project => "Project lifecycle events",
                HookEventType::Milestone => "Milestone lifecycle events",
                HookEventType::Issue => "Issue lifecycle events",
                HookEventType::Release => "Release lifecycle events",
            },
        })
        .collect();
    (StatusCode::OK, Json(types))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/event-types", get(event_types_handler))
}
