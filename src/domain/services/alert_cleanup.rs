// src/domain/services/alert_cleanup.rs
use crate::domain::error::DomainResult;

/// Port to the alerting subsystem used when tags disappear from services.
///
/// Both operations are idempotent and report how many alerts were removed.
pub trait AlertCleanupService: std::fmt::Debug + Send + Sync {
    /// Clear alerts scoped exactly to one service and tag name
    fn clear_alerts_by_service_and_tag(&self, service_id: i32, tag_name: &str)
        -> DomainResult<usize>;

    /// Clear all alerts recorded under a tag name, across every service
    fn clear_alerts_by_tag(&self, tag_name: &str) -> DomainResult<usize>;
}
