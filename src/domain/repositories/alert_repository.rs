// src/domain/repositories/alert_repository.rs
use crate::domain::alert::{Alert, AlertFilter};
use crate::domain::error::DomainError;

/// Persistence for alerts
pub trait AlertRepository: std::fmt::Debug + Send + Sync {
    fn add(&self, alert: &mut Alert) -> Result<(), DomainError>;

    fn search(&self, filter: &AlertFilter) -> Result<Vec<Alert>, DomainError>;

    /// Delete alerts scoped exactly to (service_id, tag_name), returns rows removed
    fn delete_by_service_and_tag(
        &self,
        service_id: i32,
        tag_name: &str,
    ) -> Result<usize, DomainError>;

    /// Delete every alert recorded under tag_name, returns rows removed
    fn delete_by_tag(&self, tag_name: &str) -> Result<usize, DomainError>;
}
