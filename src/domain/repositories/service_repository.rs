// src/domain/repositories/service_repository.rs
use crate::domain::error::DomainError;
use crate::domain::service::{NewService, Service};

/// Persistence for monitored services
pub trait ServiceRepository: std::fmt::Debug + Send + Sync {
    fn get_all(&self) -> Result<Vec<Service>, DomainError>;

    fn get_by_id(&self, id: i32) -> Result<Option<Service>, DomainError>;

    /// Insert a new service and return its ID
    fn add(&self, service: &NewService) -> Result<i32, DomainError>;

    /// Delete a service and its tag links. Returns false if it did not exist.
    fn delete(&self, id: i32) -> Result<bool, DomainError>;
}
