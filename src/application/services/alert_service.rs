// src/application/services/alert_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::alert::{Alert, AlertFilter};

/// Service interface for alerts raised against tags
pub trait AlertService: Send + Sync {
    /// Record a new alert, optionally scoped to one service
    fn record_alert(
        &self,
        service_id: Option<i32>,
        tag_name: &str,
        title: &str,
    ) -> ApplicationResult<Alert>;

    /// List alerts, optionally filtered by tag name and/or service
    fn get_alerts(&self, filter: &AlertFilter) -> ApplicationResult<Vec<Alert>>;
}
