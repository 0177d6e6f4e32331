// src/application/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Tag not found with ID {0}")]
    TagNotFound(i32),

    #[error("Service not found with ID {0}")]
    ServiceNotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            // keep not-found variants intact so callers can still map them
            err @ (ApplicationError::TagNotFound(_) | ApplicationError::ServiceNotFound(_)) => err,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApplicationError::TagNotFound(_)
                | ApplicationError::ServiceNotFound(_)
                | ApplicationError::Domain(DomainError::NotFound(_))
        )
    }

    /// Caller supplied bad input, as opposed to a failing dependency
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ApplicationError::Validation(_)
                | ApplicationError::Domain(
                    DomainError::InvalidTag(_)
                        | DomainError::InvalidService(_)
                        | DomainError::InvalidAlert(_)
                        | DomainError::DuplicateName(_)
                )
        )
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::Io(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
