//! Domain events and the event kinds hooks can observe.
//!
//! [`HookEventType`] enumerates the domain occurrences a hook opts into.
//! [`HookEvent`] is what the registration service broadcasts through the
//! [`super::EventBus`] after a successful mutation; the delivery
//! dispatcher consumes these to drive outbound calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::HookId;

/// An enumerated domain occurrence a hook can observe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HookEventType {
    /// Project lifecycle events.
    Project,
    /// Milestone lifecycle events.
    Milestone,
    /// Issue lifecycle events.
    Issue,
    /// Release lifecycle events.
    Release,
}

impl HookEventType {
    /// Returns the storage/wire key for this event kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Milestone => "milestone",
            Self::Issue => "issue",
            Self::Release => "release",
        }
    }

    /// Parses a storage/wire key back into an event kind.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "project" => Some(Self::Project),
            "milestone" => Some(Self::Milestone),
            "issue" => Some(Self::Issue),
            "release" => Some(Self::Release),
            _ => None,
        }
    }

    /// All known event kinds, in declaration order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Project, Self::Milestone, Self::Issue, Self::Release]
    }
}

/// Domain event emitted after a hook mutation.
///
/// Broadcast best-effort: publishers never wait for listeners and a
/// missed event is not redelivered. Durable delivery to subscriber
/// endpoints is the dispatcher's job, fed from the store, not from this
/// channel.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum HookEvent {
    /// Emitted after a hook is durably registered.
    HookCreated {
        /// Hook identifier.
        hook_id: HookId,
        /// The registered endpoint URL.
        endpoint_url: String,
        /// Correlates the event with the request that caused it.
        causation_id: Uuid,
        /// Commit timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a hook is removed.
    HookRemoved {
        /// Hook identifier.
        hook_id: HookId,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl HookEvent {
    /// Returns the hook ID associated with this event.
    #[must_use]
    pub fn hook_id(&self) -> HookId {
        match self {
            Self::HookCreated { hook_id, .. } | Self::HookRemoved { hook_id, .. } => *hook_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::HookCreated { .. } => "hook_created",
            Self::HookRemoved { .. } => "hook_removed",
        }
    }
}
