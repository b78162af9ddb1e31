//! Pre-write validation for hook registration.
//!
//! Decides, before any write, whether a proposed hook may be persisted.
//! Checks run in a stable precedence order; the first failure wins:
//!
//! 1. endpoint URL shape — [`GatewayError::InvalidUrl`]
//! 2. endpoint URL uniqueness — [`GatewayError::DuplicateEndpoint`]
//! 3. hook quota — [`GatewayError::QuotaExceeded`]
//! 4. `event_types` container present — [`GatewayError::MissingField`]
//!
//! All store-backed checks read current persisted state with no caching,
//! so concurrent registration attempts each see a live view. The
//! uniqueness check here is only a fast reject: the store re-enforces it
//! at commit time, which is what makes the check-then-write race safe.
//! The quota check has no storage-level backstop and is best-effort
//! under concurrency; the overshoot is bounded by the number of
//! simultaneously in-flight registrations.

use url::Url;

use super::hook_service::RegisterHook;
use crate::error::GatewayError;
use crate::persistence::HookStore;

/// Runs all registration checks in precedence order.
///
/// # Errors
///
/// Returns the first failing rule's error; see the module docs for the
/// order. Storage failures during the read-only checks surface as
/// [`GatewayError::Storage`].
pub async fn validate_registration(
    store: &dyn HookStore,
    request: &RegisterHook,
    max_hook_count: u32,
) -> Result<(), GatewayError> {
    validate_endpoint_url(&request.endpoint_url)?;

    if store.exists_by_url(&request.endpoint_url).await? {
        return Err(GatewayError::DuplicateEndpoint(
            request.endpoint_url.clone(),
        ));
    }

    if store.count().await? >= u64::from(max_hook_count) {
        return Err(GatewayError::QuotaExceeded {
            limit: max_hook_count,
        });
    }

    // Only a missing container is rejected; an empty set is a valid
    // "observes nothing" registration.
    if request.event_types.is_none() {
        return Err(GatewayError::MissingField("event_types"));
    }

    Ok(())
}

/// Checks that an endpoint URL is non-empty, parseable, http(s), and
/// carries a host.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidUrl`] describing the first failure.
pub fn validate_endpoint_url(url: &str) -> Result<(), GatewayError> {
    if url.is_empty() {
        return Err(GatewayError::InvalidUrl("must not be empty".to_string()));
    }

    let parsed =
        Url::parse(url).map_err(|e| GatewayError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(GatewayError::InvalidUrl(format!(
                "unsupported scheme: {scheme}"
            )));
        }
    }

    if parsed.host_str().is_none() {
        return Err(GatewayError::InvalidUrl("missing host".to_string()));
    }

    Ok(())
}
