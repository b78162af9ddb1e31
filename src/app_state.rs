//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::HookService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Hook service for all business logic.
    pub hook_service: Arc<HookService>,
    /// Event bus for in-process listeners (delivery dispatcher, audit).
    pub event_bus: EventBus,
}
