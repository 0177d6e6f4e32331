// src/domain/audit.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditActionType {
    Create,
    Update,
    Delete,
}

impl AuditActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditActionType::Create => "CREATE",
            AuditActionType::Update => "UPDATE",
            AuditActionType::Delete => "DELETE",
        }
    }
}

impl FromStr for AuditActionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(AuditActionType::Create),
            "UPDATE" => Ok(AuditActionType::Update),
            "DELETE" => Ok(AuditActionType::Delete),
            other => Err(DomainError::AuditOperationFailed(format!(
                "Unknown audit action type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditResourceType {
    Service,
    Tag,
}

impl AuditResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditResourceType::Service => "SERVICE",
            AuditResourceType::Tag => "TAG",
        }
    }
}

impl FromStr for AuditResourceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SERVICE" => Ok(AuditResourceType::Service),
            "TAG" => Ok(AuditResourceType::Tag),
            other => Err(DomainError::AuditOperationFailed(format!(
                "Unknown audit resource type: {}",
                other
            ))),
        }
    }
}

/// What happened to which resource, and who did it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditAction {
    pub action_type: AuditActionType,
    pub resource_type: AuditResourceType,
    pub resource_id: String,
    pub user_id: i32,
    pub user_name: String,
    pub resource_name: String,
}

impl AuditAction {
    pub fn new(
        action_type: AuditActionType,
        resource_type: AuditResourceType,
        resource_id: impl ToString,
        user: &User,
        resource_name: impl Into<String>,
    ) -> Self {
        Self {
            action_type,
            resource_type,
            resource_id: resource_id.to_string(),
            user_id: user.id,
            user_name: user.full_name.clone(),
            resource_name: resource_name.into(),
        }
    }
}

/// A persisted audit action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogEntry {
    pub id: i32,
    #[serde(flatten)]
    pub action: AuditAction,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for AuditLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} '{}' by {} ({})",
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.action.action_type.as_str(),
            self.action.resource_type.as_str(),
            self.action.resource_id,
            self.action.resource_name,
            self.action.user_name,
            self.action.user_id
        )
    }
}
