//! Service layer: registration orchestration and validation.
//!
//! [`HookService`] owns the validated write path for hooks and emits
//! events through the [`crate::domain::EventBus`]; [`validation`] holds
//! the pre-write decision logic.

pub mod hook_service;
pub mod validation;

pub use hook_service::{HookService, RegisterHook};
