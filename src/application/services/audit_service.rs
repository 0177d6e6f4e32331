// src/application/services/audit_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::audit::{AuditAction, AuditLogEntry};

/// Records who changed what
pub trait AuditService: Send + Sync {
    /// Persist an audit entry and return its ID
    fn log_action(&self, action: &AuditAction) -> ApplicationResult<i32>;

    /// Most recent entries first
    fn get_recent(&self, limit: usize) -> ApplicationResult<Vec<AuditLogEntry>>;
}
