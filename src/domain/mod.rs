//! Domain layer: core types and the event system.
//!
//! This module contains the webhook domain model: hook identity, the
//! hook entity with its owned headers and delivery records, the event
//! kinds a hook can observe, and the event bus for broadcasting
//! mutations to in-process listeners.

pub mod event_bus;
pub mod hook;
pub mod hook_event;
pub mod hook_id;

pub use event_bus::EventBus;
pub use hook::{DEFAULT_CONTENT_TYPE, DeliveryRecord, HookHeader, HookSummary, WebHook};
pub use hook_event::{HookEvent, HookEventType};
pub use hook_id::HookId;
