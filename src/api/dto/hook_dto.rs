//! Request/response DTOs for hook endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{DeliveryRecord, HookEventType, HookId, HookSummary, WebHook};

/// Body of `POST /hooks`.
///
/// `event_types` distinguishes "absent" from "empty": leaving the field
/// out is a validation error, sending `[]` registers a hook that
/// observes nothing.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateHookRequest {
    /// Delivery endpoint URL. Must be a well-formed http(s) URL, unique
    /// across all hooks.
    pub endpoint_url: String,
    /// Optional secret used downstream to sign delivered payloads.
    #[serde(default)]
    pub secret: Option<String>,
    /// Whether the hook participates in delivery matching. Defaults to
    /// true.
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Event kinds to observe. Required; duplicates are collapsed.
    #[serde(default)]
    pub event_types: Option<Vec<HookEventType>>,
}

fn default_is_active() -> bool {
    true
}

/// A hook as returned by the API. The signing secret is never echoed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HookResponse {
    /// Hook identifier.
    pub id: HookId,
    /// Delivery endpoint URL.
    pub endpoint_url: String,
    /// Media type of delivered payloads.
    pub content_type: String,
    /// Whether the hook participates in delivery matching.
    pub is_active: bool,
    /// Observed event kinds, deduplicated, in stable order.
    pub event_types: Vec<HookEventType>,
    /// Whether a signing secret is configured.
    pub has_secret: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub last_modified_at: DateTime<Utc>,
}

impl From<&WebHook> for HookResponse {
    fn from(hook: &WebHook) -> Self {
        Self {
            id: hook.id,
            endpoint_url: hook.endpoint_url.clone(),
            content_type: hook.content_type.clone(),
            is_active: hook.is_active,
            event_types: hook.event_types.iter().copied().collect(),
            has_secret: hook.secret.is_some(),
            created_at: hook.created_at,
            last_modified_at: hook.last_modified_at,
        }
    }
}

/// One row in the hook list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HookSummaryDto {
    /// Hook identifier.
    pub id: HookId,
    /// Delivery endpoint URL.
    pub endpoint_url: String,
    /// Whether the hook participates in delivery matching.
    pub is_active: bool,
    /// Number of observed event kinds.
    pub event_type_count: usize,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<HookSummary> for HookSummaryDto {
    fn from(summary: HookSummary) -> Self {
        Self {
            id: summary.id,
            endpoint_url: summary.endpoint_url,
            is_active: summary.is_active,
            event_type_count: summary.event_type_count,
            created_at: summary.created_at,
        }
    }
}

/// Paginated hook list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HookListResponse {
    /// Current page of hook summaries.
    pub data: Vec<HookSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// One delivery attempt in a hook's history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeliveryRecordDto {
    /// HTTP status returned by the subscriber endpoint, if any.
    pub status_code: Option<u16>,
    /// Whether the attempt was counted as delivered.
    pub success: bool,
    /// Transport-level error message for failed attempts.
    pub error: Option<String>,
    /// When the attempt was made.
    pub attempted_at: DateTime<Utc>,
}

impl From<DeliveryRecord> for DeliveryRecordDto {
    fn from(record: DeliveryRecord) -> Self {
        Self {
            status_code: record.status_code,
            success: record.success,
            error: record.error,
            attempted_at: record.attempted_at,
        }
    }
}
