//! # hook-gateway
//!
//! Webhook registration and event fan-out gateway.
//!
//! This crate owns the validated, concurrency-safe creation of webhook
//! registrations ("hooks") and the asynchronous publication path that
//! hands domain events to in-process listeners without blocking the
//! triggering operation. Outbound delivery to subscriber endpoints is
//! performed by an external dispatcher that subscribes to the event bus
//! and appends delivery records through the store.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── HookService (service/)
//!     ├── Validation (service/)
//!     ├── EventBus (domain/)
//!     │
//!     └── HookStore (persistence/)
//!           ├── InMemoryHookStore
//!           └── PostgresHookStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
