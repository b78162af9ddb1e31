//! Persistence layer: the hook store and its implementations.
//!
//! [`HookStore`] is the single shared mutable resource in the system.
//! Two implementations exist: [`InMemoryHookStore`] for development and
//! tests, and [`PostgresHookStore`] for production via `sqlx::PgPool`.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryHookStore;
pub use postgres::PostgresHookStore;
pub use store::HookStore;
