//! Business operations bridging the views and the REST collaborators.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod collection;
pub mod customer;
pub mod image;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The backend reported the record does not exist; shown as a dedicated
    /// "not found" state rather than a generic failure.
    #[error("Resource not found")]
    NotFound,
    /// Local validation rejected the payload before any network call.
    #[error("{0}")]
    Validation(String),
    /// The collaborator failed; the message is displayable as-is.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}
