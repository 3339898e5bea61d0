//! Lifecycle operations over the entity store.
//!
//! Services are plain functions generic over the repository traits so that the
//! HTTP layer stays a thin wrapper and tests can substitute an in-memory store.

pub mod categories;
pub mod errors;

pub use errors::{ServiceError, ServiceResult};
