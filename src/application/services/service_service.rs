// src/application/services/service_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::service::{NewService, Service};
use crate::domain::user::User;

/// Service interface for monitored services
pub trait ServiceService: Send + Sync {
    /// Persist a service and record who created it
    fn create_service(&self, new_service: NewService, user: &User) -> ApplicationResult<Service>;

    /// Delete a service with its tag links and record who deleted it
    fn delete_service(&self, service_id: i32, user: &User) -> ApplicationResult<()>;

    fn get_service(&self, service_id: i32) -> ApplicationResult<Option<Service>>;

    fn get_all_services(&self) -> ApplicationResult<Vec<Service>>;
}
