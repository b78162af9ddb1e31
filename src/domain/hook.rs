//! Webhook entity and its owned child records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{HookEventType, HookId};

/// The only content type supported for outbound deliveries in this
/// version. Fixed at creation, not user-settable.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A registered webhook endpoint with its configuration and event
/// interests.
///
/// Created only through the registration service's validated write path.
/// `headers` and delivery records are owned exclusively by the hook and
/// cannot outlive it (cascade lifecycle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebHook {
    /// Unique hook identifier (immutable after creation).
    pub id: HookId,

    /// Delivery endpoint URL. Globally unique across all hooks, active
    /// or not, by case-sensitive exact match.
    pub endpoint_url: String,

    /// Optional secret used downstream to sign delivered payloads.
    pub secret: Option<String>,

    /// Media type of delivered payloads. Always [`DEFAULT_CONTENT_TYPE`].
    pub content_type: String,

    /// Inactive hooks are excluded from delivery matching but still
    /// count toward the quota.
    pub is_active: bool,

    /// Event kinds this hook observes. Duplicates collapsed; an empty
    /// set means the hook observes nothing.
    pub event_types: BTreeSet<HookEventType>,

    /// Ordered name/value pairs sent with every delivery for this hook.
    /// Empty at creation.
    pub headers: Vec<HookHeader>,

    /// Creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last mutation.
    pub last_modified_at: DateTime<Utc>,
}

impl WebHook {
    /// Creates a new `WebHook` with a fresh identity, the fixed content
    /// type, deduplicated event types, and empty header/record
    /// collections.
    #[must_use]
    pub fn new(
        endpoint_url: String,
        secret: Option<String>,
        is_active: bool,
        event_types: impl IntoIterator<Item = HookEventType>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: HookId::new(),
            endpoint_url,
            secret,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            is_active,
            event_types: event_types.into_iter().collect(),
            headers: Vec::new(),
            created_at: now,
            last_modified_at: now,
        }
    }
}

/// A single delivery header owned by a hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookHeader {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// One delivery attempt for a hook.
///
/// Produced only by the delivery dispatcher, never by the registration
/// service. Append-only; removed only when the owning hook is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Hook this attempt belongs to.
    pub hook_id: HookId,
    /// HTTP status returned by the subscriber endpoint, if a response
    /// was received at all.
    pub status_code: Option<u16>,
    /// Whether the attempt was counted as delivered.
    pub success: bool,
    /// Transport-level error message for failed attempts.
    pub error: Option<String>,
    /// When the attempt was made.
    pub attempted_at: DateTime<Utc>,
}

/// Lightweight summary of a hook for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct HookSummary {
    /// Hook identifier.
    pub id: HookId,
    /// Delivery endpoint URL.
    pub endpoint_url: String,
    /// Whether the hook participates in delivery matching.
    pub is_active: bool,
    /// Number of event kinds observed.
    pub event_type_count: usize,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&WebHook> for HookSummary {
    fn from(hook: &WebHook) -> Self {
        Self {
            id: hook.id,
            endpoint_url: hook.endpoint_url.clone(),
            is_active: hook.is_active,
            event_type_count: hook.event_types.len(),
            created_at: hook.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_fixes_content_type() {
        let hook = WebHook::new("https://example.com/hook".to_string(), None, true, []);
        assert_eq!(hook.content_type, DEFAULT_CONTENT_TYPE);
        assert!(hook.headers.is_empty());
        assert!(hook.event_types.is_empty());
    }

    #[test]
    fn new_collapses_duplicate_event_types() {
        let hook = WebHook::new(
            "https://example.com/hook".to_string(),
            None,
            true,
            [
                HookEventType::Issue,
                HookEventType::Issue,
                HookEventType::Milestone,
            ],
        );
        assert_eq!(hook.event_types.len(), 2);
        assert!(hook.event_types.contains(&HookEventType::Issue));
        assert!(hook.event_types.contains(&HookEventType::Milestone));
    }

    #[test]
    fn summary_reflects_entity() {
        let hook = WebHook::new(
            "https://example.com/hook".to_string(),
            Some("s3cret".to_string()),
            false,
            [HookEventType::Project],
        );
        let summary = HookSummary::from(&hook);
        assert_eq!(summary.id, hook.id);
        assert_eq!(summary.endpoint_url, hook.endpoint_url);
        assert!(!summary.is_active);
        assert_eq!(summary.event_type_count, 1);
    }
}
