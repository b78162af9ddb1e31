//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "endpoint url already registered: https://example.com/hook",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                |
/// |-----------|---------------------|----------------------------|
/// | 1000–1999 | Validation          | 400 Bad Request            |
/// | 2000–2999 | State/Conflict      | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server              | 500 Internal Server Error  |
/// | 4000–4999 | Authorization       | 401 Unauthorized           |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Endpoint URL is empty or not a well-formed http/https URL.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),

    /// A required request field is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Another hook is already registered for the same endpoint URL.
    /// Raised both by pre-write validation and by the store at commit
    /// time; callers cannot distinguish the two.
    #[error("endpoint url already registered: {0}")]
    DuplicateEndpoint(String),

    /// The maximum number of registered hooks has been reached.
    #[error("maximum hook count ({limit}) reached")]
    QuotaExceeded {
        /// The configured hook quota.
        limit: u32,
    },

    /// Hook with the given ID was not found.
    #[error("hook not found: {0}")]
    HookNotFound(uuid::Uuid),

    /// Missing or insufficient caller credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Persistence layer failure other than a uniqueness conflict.
    /// All-or-nothing: no partial state survives.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidUrl(_) => 1001,
            Self::MissingField(_) => 1002,
            Self::DuplicateEndpoint(_) => 2001,
            Self::QuotaExceeded { .. } => 2002,
            Self::HookNotFound(_) => 2003,
            Self::Unauthorized => 4001,
            Self::Storage(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl(_) | Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateEndpoint(_) | Self::QuotaExceeded { .. } => StatusCode::CONFLICT,
            Self::HookNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
