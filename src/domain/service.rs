// src/domain/service.rs
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Manual,
    Docker,
    Systemd,
    Kubernetes,
    Http,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Manual => "manual",
            ServiceType::Docker => "docker",
            ServiceType::Systemd => "systemd",
            ServiceType::Kubernetes => "kubernetes",
            ServiceType::Http => "http",
        }
    }
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(ServiceType::Manual),
            "docker" => Ok(ServiceType::Docker),
            "systemd" => Ok(ServiceType::Systemd),
            "kubernetes" | "k8s" => Ok(ServiceType::Kubernetes),
            "http" => Ok(ServiceType::Http),
            other => Err(DomainError::InvalidService(format!(
                "Unknown service type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    Error,
    Unknown,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Running => "running",
            ServiceStatus::Stopped => "stopped",
            ServiceStatus::Error => "error",
            ServiceStatus::Unknown => "unknown",
        }
    }
}

impl FromStr for ServiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "running" => Ok(ServiceStatus::Running),
            "stopped" => Ok(ServiceStatus::Stopped),
            "error" => Ok(ServiceStatus::Error),
            "unknown" => Ok(ServiceStatus::Unknown),
            other => Err(DomainError::InvalidService(format!(
                "Unknown service status: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monitored service as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub provider_id: i32,
    pub service_type: ServiceType,
    pub status: ServiceStatus,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.id, self.name, self.service_type, self.status
        )
    }
}

/// Data for a service that is about to be created
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct NewService {
    pub name: String,
    #[builder(default = "0")]
    pub provider_id: i32,
    #[builder(default = "ServiceType::Manual")]
    pub service_type: ServiceType,
    #[builder(default = "ServiceStatus::Unknown")]
    pub status: ServiceStatus,
    #[builder(default)]
    pub external_url: Option<String>,
}

impl NewServiceBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("Service name cannot be empty".to_string());
            }
        }
        if let Some(Some(url)) = &self.external_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!(
                    "External URL must start with http:// or https://: {}",
                    url
                ));
            }
        }
        if let Some(provider_id) = self.provider_id {
            if provider_id < 0 {
                return Err(format!("Invalid provider ID: {}", provider_id));
            }
        }
        Ok(())
    }
}

impl NewService {
    /// Shortcut for a manually tracked service with defaults
    pub fn named<S: AsRef<str>>(name: S) -> DomainResult<Self> {
        Ok(NewServiceBuilder::default()
            .name(name.as_ref().trim())
            .build()?)
    }
}
