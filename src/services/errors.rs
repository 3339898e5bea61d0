use thiserror::Error;

use crate::repository::RepositoryError;

/// Failures raised by the category lifecycle operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A uniqueness invariant would be violated.
    #[error("{entity} with {field} '{value}' already exists")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// The requested entity does not exist.
    #[error("{entity} entity with {field} '{value}' does not exist")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// The store failed in a way the lifecycle does not classify.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
