//! Hook service: the only path through which hooks are durably created,
//! and the emitter of domain events.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{DeliveryRecord, EventBus, HookEvent, HookEventType, HookId, HookSummary, WebHook};
use crate::error::GatewayError;
use crate::persistence::HookStore;
use crate::service::validation;

/// Validated input for a registration attempt.
///
/// `event_types` is an `Option` because a missing container and an empty
/// one are different things: the former fails validation, the latter is
/// a hook that observes nothing.
#[derive(Debug, Clone)]
pub struct RegisterHook {
    /// Requested delivery endpoint URL.
    pub endpoint_url: String,
    /// Optional signing secret.
    pub secret: Option<String>,
    /// Whether the hook should participate in delivery matching.
    pub is_active: bool,
    /// Event kinds to observe; duplicates are collapsed on persist.
    pub event_types: Option<Vec<HookEventType>>,
    /// Correlates emitted events with the request that caused them.
    pub causation_id: Uuid,
}

/// Orchestration layer for hook operations.
///
/// Every mutation follows the pattern: validate → persist → emit event
/// → return result. Event emission is fire-and-forget: the durable
/// write alone decides success, and nothing downstream of the commit
/// can block or fail the caller.
#[derive(Debug, Clone)]
pub struct HookService {
    store: Arc<dyn HookStore>,
    event_bus: EventBus,
    max_hook_count: u32,
}

impl HookService {
    /// Creates a new `HookService`.
    #[must_use]
    pub fn new(store: Arc<dyn HookStore>, event_bus: EventBus, max_hook_count: u32) -> Self {
        Self {
            store,
            event_bus,
            max_hook_count,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Registers a new hook.
    ///
    /// Runs the full validation chain against current store state, then
    /// persists the hook (fixed content type, deduplicated event types,
    /// fresh identity, empty header/record collections) as one atomic
    /// unit. After the commit a `HookCreated` event is published without
    /// waiting for any listener. Dropping the returned future before the
    /// store commit creates nothing and publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns the first failing validation rule's error with no write
    /// performed, [`GatewayError::DuplicateEndpoint`] if a racing
    /// registration won the same URL at commit time, or
    /// [`GatewayError::Storage`] on any other persistence failure.
    pub async fn register(&self, request: RegisterHook) -> Result<WebHook, GatewayError> {
        validation::validate_registration(self.store.as_ref(), &request, self.max_hook_count)
            .await?;

        let hook = WebHook::new(
            request.endpoint_url,
            request.secret,
            request.is_active,
            request.event_types.unwrap_or_default(),
        );

        let hook = self.store.insert(hook).await?;

        // Best-effort notification; success is already decided by the
        // write, so a publish with no receivers is not an error.
        let _ = self.event_bus.publish(HookEvent::HookCreated {
            hook_id: hook.id,
            endpoint_url: hook.endpoint_url.clone(),
            causation_id: request.causation_id,
            timestamp: Utc::now(),
        });

        tracing::info!(hook_id = %hook.id, url = %hook.endpoint_url, "hook registered");
        Ok(hook)
    }

    /// Loads a hook with its headers.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HookNotFound`] if no hook has this ID.
    pub async fn get(&self, id: HookId) -> Result<WebHook, GatewayError> {
        self.store.get(id).await
    }

    /// Returns summaries of all registered hooks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on persistence failure.
    pub async fn list(&self) -> Result<Vec<HookSummary>, GatewayError> {
        self.store.list().await
    }

    /// Removes a hook, cascading to its headers and delivery records,
    /// and emits a `HookRemoved` event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HookNotFound`] if no hook has this ID.
    pub async fn remove(&self, id: HookId) -> Result<(), GatewayError> {
        self.store.remove(id).await?;

        let _ = self.event_bus.publish(HookEvent::HookRemoved {
            hook_id: id,
            timestamp: Utc::now(),
        });

        tracing::info!(hook_id = %id, "hook removed");
        Ok(())
    }

    /// Returns a hook's delivery history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HookNotFound`] if no hook has this ID.
    pub async fn deliveries(&self, id: HookId) -> Result<Vec<DeliveryRecord>, GatewayError> {
        self.store.deliveries(id).await
    }
}
