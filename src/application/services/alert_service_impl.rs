// src/application/services/alert_service_impl.rs
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::alert_service::AlertService;
use crate::domain::alert::{Alert, AlertFilter};
use crate::domain::error::DomainResult;
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::services::alert_cleanup::AlertCleanupService;
use tracing::{debug, info, instrument};

/// Local alert store. Also serves as the cleanup port for tag operations.
#[derive(Debug)]
pub struct AlertServiceImpl<R: AlertRepository> {
    repository: Arc<R>,
}

impl<R: AlertRepository> AlertServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        debug!("Creating new AlertServiceImpl");
        Self { repository }
    }
}

impl<R: AlertRepository> AlertService for AlertServiceImpl<R> {
    #[instrument(skip(self), level = "debug")]
    fn record_alert(
        &self,
        service_id: Option<i32>,
        tag_name: &str,
        title: &str,
    ) -> ApplicationResult<Alert> {
        let mut alert = Alert::new(service_id, tag_name, title)
            .map_err(|e| ApplicationError::Validation(e.to_string()))?;
        self.repository.add(&mut alert)?;
        info!("Recorded alert: {}", alert);
        Ok(alert)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_alerts(&self, filter: &AlertFilter) -> ApplicationResult<Vec<Alert>> {
        Ok(self.repository.search(filter)?)
    }
}

impl<R: AlertRepository> AlertCleanupService for AlertServiceImpl<R> {
    #[instrument(skip(self), level = "debug")]
    fn clear_alerts_by_service_and_tag(
        &self,
        service_id: i32,
        tag_name: &str,
    ) -> DomainResult<usize> {
        let cleared = self
            .repository
            .delete_by_service_and_tag(service_id, tag_name)?;
        debug!(
            "Cleared {} alerts for service {} and tag '{}'",
            cleared, service_id, tag_name
        );
        Ok(cleared)
    }

    #[instrument(skip(self), level = "debug")]
    fn clear_alerts_by_tag(&self, tag_name: &str) -> DomainResult<usize> {
        let cleared = self.repository.delete_by_tag(tag_name)?;
        debug!("Cleared {} alerts for tag '{}'", cleared, tag_name);
        Ok(cleared)
    }
}
