// src/domain/repositories/audit_repository.rs
use crate::domain::audit::{AuditAction, AuditLogEntry};
use crate::domain::error::DomainError;

pub trait AuditRepository: std::fmt::Debug + Send + Sync {
    fn add(&self, action: &AuditAction) -> Result<i32, DomainError>;

    /// Most recent entries first
    fn get_recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, DomainError>;
}
