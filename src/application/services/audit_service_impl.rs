// src/application/services/audit_service_impl.rs
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::audit_service::AuditService;
use crate::domain::audit::{AuditAction, AuditLogEntry};
use crate::domain::repositories::audit_repository::AuditRepository;
use tracing::{debug, info, instrument};

#[derive(Debug)]
pub struct AuditServiceImpl<R: AuditRepository> {
    repository: Arc<R>,
}

impl<R: AuditRepository> AuditServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        debug!("Creating new AuditServiceImpl");
        Self { repository }
    }
}

impl<R: AuditRepository> AuditService for AuditServiceImpl<R> {
    #[instrument(skip_all, level = "debug", fields(
        action = action.action_type.as_str(),
        resource = action.resource_type.as_str(),
        resource_id = %action.resource_id,
    ))]
    fn log_action(&self, action: &AuditAction) -> ApplicationResult<i32> {
        let id = self
            .repository
            .add(action)
            .map_err(|e| ApplicationError::from(e).context("Failed to write audit log"))?;
        info!(
            "Audit {} {} {} by {}",
            action.action_type.as_str(),
            action.resource_type.as_str(),
            action.resource_id,
            action.user_name
        );
        Ok(id)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_recent(&self, limit: usize) -> ApplicationResult<Vec<AuditLogEntry>> {
        if limit == 0 {
            return Err(ApplicationError::Validation(
                "Limit must be greater than zero".to_string(),
            ));
        }
        Ok(self.repository.get_recent(limit)?)
    }
}
