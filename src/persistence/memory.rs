//! In-memory hook store for development and tests.
//!
//! [`InMemoryHookStore`] keeps all hooks in a `HashMap` behind a single
//! [`tokio::sync::RwLock`]. The endpoint-uniqueness invariant is checked
//! inside the write-lock section, which makes the insert check-and-write
//! atomic: of two racing registrations for the same URL, exactly one can
//! hold the lock first and the other fails with `DuplicateEndpoint`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::HookStore;
use crate::domain::{DeliveryRecord, HookId, HookSummary, WebHook};
use crate::error::GatewayError;

/// A hook plus its append-only delivery history.
#[derive(Debug)]
struct HookRecord {
    hook: WebHook,
    deliveries: Vec<DeliveryRecord>,
}

/// Volatile [`HookStore`] backed by a locked `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryHookStore {
    hooks: RwLock<HashMap<HookId, HookRecord>>,
}

impl InMemoryHookStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HookStore for InMemoryHookStore {
    async fn insert(&self, hook: WebHook) -> Result<WebHook, GatewayError> {
        let mut map = self.hooks.write().await;
        if map
            .values()
            .any(|r| r.hook.endpoint_url == hook.endpoint_url)
        {
            return Err(GatewayError::DuplicateEndpoint(hook.endpoint_url));
        }
        let stored = hook.clone();
        map.insert(
            hook.id,
            HookRecord {
                hook,
                deliveries: Vec::new(),
            },
        );
        Ok(stored)
    }

    async fn get(&self, id: HookId) -> Result<WebHook, GatewayError> {
        let map = self.hooks.read().await;
        map.get(&id)
            .map(|r| r.hook.clone())
            .ok_or(GatewayError::HookNotFound(*id.as_uuid()))
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool, GatewayError> {
        let map = self.hooks.read().await;
        Ok(map.values().any(|r| r.hook.endpoint_url == url))
    }

    async fn count(&self) -> Result<u64, GatewayError> {
        let map = self.hooks.read().await;
        Ok(map.len() as u64)
    }

    async fn list(&self) -> Result<Vec<HookSummary>, GatewayError> {
        let map = self.hooks.read().await;
        let mut summaries: Vec<HookSummary> =
            map.values().map(|r| HookSummary::from(&r.hook)).collect();
        summaries.sort_by_key(|s| (s.created_at, s.id));
        Ok(summaries)
    }

    async fn remove(&self, id: HookId) -> Result<(), GatewayError> {
        let mut map = self.hooks.write().await;
        // Dropping the record drops headers and deliveries with it.
        map.remove(&id)
            .map(|_| ())
            .ok_or(GatewayError::HookNotFound(*id.as_uuid()))
    }

    async fn append_delivery(&self, record: DeliveryRecord) -> Result<(), GatewayError> {
        let mut map = self.hooks.write().await;
        let entry = map
            .get_mut(&record.hook_id)
            .ok_or(GatewayError::HookNotFound(*record.hook_id.as_uuid()))?;
        entry.deliveries.push(record);
        Ok(())
    }

    async fn deliveries(&self, id: HookId) -> Result<Vec<DeliveryRecord>, GatewayError> {
        let map = self.hooks.read().await;
        map.get(&id)
            .map(|r| r.deliveries.clone())
            .ok_or(GatewayError::HookNotFound(*id.as_uuid()))
    }
}
