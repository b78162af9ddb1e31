//! REST endpoint handlers organized by resource.

pub mod deliveries;
pub mod hook;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(hook::routes())
        .merge(deliveries::routes())
}
