//! Data Transfer Objects for REST request/response serialization.

pub mod common_dto;
pub mod hook_dto;

pub use common_dto::*;
pub use hook_dto::*;
