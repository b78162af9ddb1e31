//! Hook CRUD handlers: register, list, get, delete.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::auth::{Capability, Principal};
use crate::api::dto::{
    CreateHookRequest, HookListResponse, HookResponse, HookSummaryDto, PaginationMeta,
    PaginationParams,
};
use crate::app_state::AppState;
use crate::domain::HookId;
use crate::error::{ErrorResponse, GatewayError};
use crate::service::RegisterHook;

/// `POST /hooks` — Register a new webhook.
///
/// # Errors
///
/// Returns [`GatewayError`] on validation failure, duplicate endpoint,
/// or exhausted quota.
#[utoipa::path(
    post,
    path = "/api/v1/hooks",
    tag = "Hooks",
    summary = "Register a webhook",
    description = "Validates and persists a new webhook registration, then publishes a hook_created event without waiting for listeners. Requires the hooks:admin role.",
    request_body = CreateHookRequest,
    responses(
        (status = 201, description = "Hook registered", body = HookResponse),
        (status = 400, description = "Malformed endpoint URL or missing field", body = ErrorResponse),
        (status = 401, description = "Caller lacks the hooks:admin role", body = ErrorResponse),
        (status = 409, description = "Duplicate endpoint or quota reached", body = ErrorResponse),
    )
)]
pub async fn create_hook(
    State(state): State<AppState>,
    principal: Principal,
    headers: HeaderMap,
    Json(req): Json<CreateHookRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    principal.require(Capability::ManageHooks)?;

    let hook = state
        .hook_service
        .register(RegisterHook {
            endpoint_url: req.endpoint_url,
            secret: req.secret,
            is_active: req.is_active,
            event_types: req.event_types,
            causation_id: causation_id(&headers),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(HookResponse::from(&hook))))
}

/// `GET /hooks` — List all hooks with pagination.
///
/// # Errors
///
/// Returns [`GatewayError`] on storage failures.
#[utoipa::path(
    get,
    path = "/api/v1/hooks",
    tag = "Hooks",
    summary = "List hooks",
    description = "Returns a paginated list of all registered hooks, active or not.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated hook list", body = HookListResponse),
    )
)]
pub async fn list_hooks(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let params = params.clamped();
    let summaries = state.hook_service.list().await?;

    let total = summaries.len() as u32;
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    // Offset in u64: page and per_page come from the query string, and
    // their u32 product can overflow.
    let start = usize::try_from(u64::from(page - 1) * u64::from(per_page)).unwrap_or(usize::MAX);
    let data: Vec<HookSummaryDto> = summaries
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .map(HookSummaryDto::from)
        .collect();

    Ok(Json(HookListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// `GET /hooks/:id` — Get hook details.
///
/// # Errors
///
/// Returns [`GatewayError::HookNotFound`] if the hook does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/hooks/{id}",
    tag = "Hooks",
    summary = "Get hook details",
    description = "Returns full details for a single hook including its delivery headers. The signing secret is never returned.",
    params(
        ("id" = uuid::Uuid, Path, description = "Hook UUID"),
    ),
    responses(
        (status = 200, description = "Hook details", body = HookResponse),
        (status = 404, description = "Hook not found", body = ErrorResponse),
    )
)]
pub async fn get_hook(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let hook = state.hook_service.get(HookId::from_uuid(id)).await?;
    Ok(Json(HookResponse::from(&hook)))
}

/// `DELETE /hooks/:id` — Remove a hook.
///
/// # Errors
///
/// Returns [`GatewayError::HookNotFound`] if the hook does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/hooks/{id}",
    tag = "Hooks",
    summary = "Delete a hook",
    description = "Removes a hook, cascading to its headers and delivery records, and emits a hook_removed event. Requires the hooks:admin role.",
    params(
        ("id" = uuid::Uuid, Path, description = "Hook UUID"),
    ),
    responses(
        (status = 204, description = "Hook deleted"),
        (status = 401, description = "Caller lacks the hooks:admin role", body = ErrorResponse),
        (status = 404, description = "Hook not found", body = ErrorResponse),
    )
)]
pub async fn delete_hook(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    principal.require(Capability::ManageHooks)?;
    state.hook_service.remove(HookId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Hook management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hooks", post(create_hook).get(list_hooks))
        .route("/hooks/{id}", get(get_hook).delete(delete_hook))
}

/// Correlation ID for events caused by this request: the forwarded
/// `x-request-id` when it is a UUID, a fresh one otherwise.
fn causation_id(headers: &HeaderMap) -> Uuid {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}
