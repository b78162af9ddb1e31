//! Delivery history read endpoint.
//!
//! Records are produced by the delivery dispatcher; this surface only
//! reads them back.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::DeliveryRecordDto;
use crate::app_state::AppState;
use crate::domain::HookId;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /hooks/:id/deliveries` — Delivery history for a hook.
///
/// # Errors
///
/// Returns [`GatewayError::HookNotFound`] if the hook does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/hooks/{id}/deliveries",
    tag = "Deliveries",
    summary = "List delivery attempts",
    description = "Returns the append-only delivery history for a hook, oldest first.",
    params(
        ("id" = uuid::Uuid, Path, description = "Hook UUID"),
    ),
    responses(
        (status = 200, description = "Delivery history", body = Vec<DeliveryRecordDto>),
        (status = 404, description = "Hook not found", body = ErrorResponse),
    )
)]
pub async fn list_deliveries(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let records = state.hook_service.deliveries(HookId::from_uuid(id)).await?;
    let dtos: Vec<DeliveryRecordDto> = records.into_iter().map(DeliveryRecordDto::from).collect();
    Ok(Json(dtos))
}

/// Delivery history routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/hooks/{id}/deliveries", get(list_deliveries))
}
