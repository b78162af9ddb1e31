//! Caller identity and capability checks.
//!
//! The gateway does not authenticate callers itself; an upstream proxy
//! is expected to resolve the caller and forward identity headers. This
//! module is the seam that turns those headers into a [`Principal`] and
//! gates mutating operations behind an explicit capability check run
//! before the operation body.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::GatewayError;

/// Header carrying the acting caller's ID (a UUID).
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Header carrying the caller's comma-separated role list.
pub const ACTOR_ROLES_HEADER: &str = "x-actor-roles";

/// A capability a handler may demand before running an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create and delete hook registrations.
    ManageHooks,
}

impl Capability {
    /// The role string that grants this capability.
    #[must_use]
    pub const fn required_role(&self) -> &'static str {
        match self {
            Self::ManageHooks => "hooks:admin",
        }
    }
}

/// The authenticated caller, extracted from forwarded identity headers.
///
/// Extraction fails with [`GatewayError::Unauthorized`] when the actor
/// header is absent or not a UUID.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Acting caller's ID.
    pub actor_id: Uuid,
    roles: Vec<String>,
}

impl Principal {
    /// Checks that the caller holds the given capability.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] if the caller's roles do
    /// not grant the capability.
    pub fn require(&self, capability: Capability) -> Result<(), GatewayError> {
        if self
            .roles
            .iter()
            .any(|r| r == capability.required_role())
        {
            Ok(())
        } else {
            Err(GatewayError::Unauthorized)
        }
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor_id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or(GatewayError::Unauthorized)?;

        let roles = parts
            .headers
            .get(ACTOR_ROLES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| {
                s.split(',')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { actor_id, roles })
    }
}
