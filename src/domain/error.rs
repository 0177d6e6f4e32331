// src/domain/error.rs
use crate::domain::service::NewServiceBuilderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Invalid service: {0}")]
    InvalidService(String),

    #[error("Invalid alert: {0}")]
    InvalidAlert(String),

    #[error("Tag operation failed: {0}")]
    TagOperationFailed(String),

    #[error("Service operation failed: {0}")]
    ServiceOperationFailed(String),

    #[error("Alert operation failed: {0}")]
    AlertOperationFailed(String),

    #[error("Audit operation failed: {0}")]
    AuditOperationFailed(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::TagOperationFailed(msg) => {
                DomainError::TagOperationFailed(format!("{}: {}", context.into(), msg))
            }
            DomainError::ServiceOperationFailed(msg) => {
                DomainError::ServiceOperationFailed(format!("{}: {}", context.into(), msg))
            }
            DomainError::AlertOperationFailed(msg) => {
                DomainError::AlertOperationFailed(format!("{}: {}", context.into(), msg))
            }
            DomainError::RepositoryError(msg) => {
                DomainError::RepositoryError(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context.into(), msg)),
            // classification must survive added context
            err @ (DomainError::NotFound(_) | DomainError::DuplicateName(_)) => err,
            err => DomainError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<NewServiceBuilderError> for DomainError {
    fn from(e: NewServiceBuilderError) -> Self {
        DomainError::InvalidService(e.to_string())
    }
}
