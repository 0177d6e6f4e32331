// src/application/services/service_service_impl.rs
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::audit_service::AuditService;
use crate::application::services::service_service::ServiceService;
use crate::domain::audit::{AuditAction, AuditActionType, AuditResourceType};
use crate::domain::repositories::service_repository::ServiceRepository;
use crate::domain::service::{NewService, Service};
use crate::domain::user::User;
use tracing::{debug, info, instrument};

pub struct ServiceServiceImpl<R: ServiceRepository> {
    repository: Arc<R>,
    audit_service: Arc<dyn AuditService>,
}

impl<R: ServiceRepository> ServiceServiceImpl<R> {
    pub fn new(repository: Arc<R>, audit_service: Arc<dyn AuditService>) -> Self {
        debug!("Creating new ServiceServiceImpl");
        Self {
            repository,
            audit_service,
        }
    }

    fn validate_id(service_id: i32) -> ApplicationResult<()> {
        if service_id <= 0 {
            return Err(ApplicationError::Validation(format!(
                "Invalid service ID: {}",
                service_id
            )));
        }
        Ok(())
    }
}

impl<R: ServiceRepository> ServiceService for ServiceServiceImpl<R> {
    #[instrument(skip(self, new_service), level = "debug", fields(name = %new_service.name, user = %user.full_name))]
    fn create_service(&self, new_service: NewService, user: &User) -> ApplicationResult<Service> {
        let id = self.repository.add(&new_service)?;
        let service = self.repository.get_by_id(id)?.ok_or_else(|| {
            ApplicationError::Other(format!("Service {} vanished right after creation", id))
        })?;

        self.audit_service.log_action(&AuditAction::new(
            AuditActionType::Create,
            AuditResourceType::Service,
            service.id,
            user,
            service.name.as_str(),
        ))?;

        info!("Created service: {}", service);
        Ok(service)
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_service(&self, service_id: i32, user: &User) -> ApplicationResult<()> {
        Self::validate_id(service_id)?;

        let service = self
            .repository
            .get_by_id(service_id)?
            .ok_or(ApplicationError::ServiceNotFound(service_id))?;

        if !self.repository.delete(service_id)? {
            return Err(ApplicationError::ServiceNotFound(service_id));
        }

        self.audit_service.log_action(&AuditAction::new(
            AuditActionType::Delete,
            AuditResourceType::Service,
            service_id,
            user,
            service.name.as_str(),
        ))?;

        info!("Deleted service: {}", service);
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn get_service(&self, service_id: i32) -> ApplicationResult<Option<Service>> {
        Self::validate_id(service_id)?;
        Ok(self.repository.get_by_id(service_id)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_all_services(&self) -> ApplicationResult<Vec<Service>> {
        Ok(self.repository.get_all()?)
    }
}
