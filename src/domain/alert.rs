// src/domain/alert.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// An alert raised by the alerting subsystem.
///
/// Alerts reference tags by name, not by id. With `service_id` set the alert
/// is scoped to one (service, tag) pair, otherwise to the tag across all
/// services.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: Option<i32>,
    pub service_id: Option<i32>,
    pub tag_name: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new<S: AsRef<str>>(service_id: Option<i32>, tag_name: S, title: S) -> DomainResult<Self> {
        let tag_name = tag_name.as_ref().trim();
        let title = title.as_ref().trim();

        if tag_name.is_empty() {
            return Err(DomainError::InvalidAlert(
                "Alert must reference a tag name".to_string(),
            ));
        }
        if title.is_empty() {
            return Err(DomainError::InvalidAlert(
                "Alert title cannot be empty".to_string(),
            ));
        }
        if let Some(id) = service_id {
            if id <= 0 {
                return Err(DomainError::InvalidAlert(format!(
                    "Invalid service ID: {}",
                    id
                )));
            }
        }

        Ok(Self {
            id: None,
            service_id,
            tag_name: tag_name.to_string(),
            title: title.to_string(),
            created_at: Utc::now(),
        })
    }

    /// True if clearing (service_id, tag_name) must remove this alert
    #[cfg(test)]
    pub(crate) fn is_scoped_to(&self, service_id: i32, tag_name: &str) -> bool {
        self.service_id == Some(service_id) && self.tag_name == tag_name
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        match self.service_id {
            Some(service_id) => write!(
                f,
                "{}: [{}@{}] {}",
                id, self.tag_name, service_id, self.title
            ),
            None => write!(f, "{}: [{}] {}", id, self.tag_name, self.title),
        }
    }
}

/// Optional constraints for listing alerts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertFilter {
    pub tag_name: Option<String>,
    pub service_id: Option<i32>,
}
