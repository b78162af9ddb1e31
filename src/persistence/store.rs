//! The storage seam for registered hooks.
//!
//! [`HookStore`] is the narrow interface the rest of the gateway sees.
//! Every mutation of hook state goes through it, and its `insert` is the
//! final arbiter of endpoint uniqueness: validation's pre-write check is
//! only a fast-reject optimization, so a duplicate that races past it
//! must still fail here with [`GatewayError::DuplicateEndpoint`].

use async_trait::async_trait;

use crate::domain::{DeliveryRecord, HookId, HookSummary, WebHook};
use crate::error::GatewayError;

/// Durable mapping from hook identity to its configuration.
///
/// Implementations must be safe to share across concurrent registration
/// attempts. Hooks own their headers and delivery records: `remove`
/// cascades to both.
#[async_trait]
pub trait HookStore: std::fmt::Debug + Send + Sync {
    /// Persists a new hook together with its initially-empty header and
    /// delivery-record collections as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DuplicateEndpoint`] if another hook holds
    /// the same endpoint URL at commit time, or
    /// [`GatewayError::Storage`] on any other persistence failure. On
    /// error nothing is written.
    async fn insert(&self, hook: WebHook) -> Result<WebHook, GatewayError>;

    /// Loads a hook with its headers.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HookNotFound`] if no hook has this ID.
    async fn get(&self, id: HookId) -> Result<WebHook, GatewayError>;

    /// Returns whether any hook (active or not) holds the given
    /// endpoint URL, by case-sensitive exact match.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on persistence failure.
    async fn exists_by_url(&self, url: &str) -> Result<bool, GatewayError>;

    /// Returns the total number of stored hooks, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on persistence failure.
    async fn count(&self) -> Result<u64, GatewayError>;

    /// Returns summaries of all stored hooks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on persistence failure.
    async fn list(&self) -> Result<Vec<HookSummary>, GatewayError>;

    /// Removes a hook, cascading to its headers and delivery records.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HookNotFound`] if no hook has this ID.
    async fn remove(&self, id: HookId) -> Result<(), GatewayError>;

    /// Appends one delivery attempt to a hook's history. Called by the
    /// delivery dispatcher, never by the registration path.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HookNotFound`] if the owning hook does
    /// not exist.
    async fn append_delivery(&self, record: DeliveryRecord) -> Result<(), GatewayError>;

    /// Returns a hook's delivery history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HookNotFound`] if no hook has this ID.
    async fn deliveries(&self, id: HookId) -> Result<Vec<DeliveryRecord>, GatewayError>;
}
