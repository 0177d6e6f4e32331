// src/cli/display.rs

use crate::cli::error::{CliError, CliResult};
use crate::domain::alert::Alert;
use crate::domain::audit::AuditLogEntry;
use crate::domain::service::Service;
use crate::domain::tag::Tag;
use crossterm::style::{Color, Stylize};
use serde::Serialize;
use std::fmt::Display;

/// JSON envelope used for every `--json` result
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

pub fn to_json<T: Serialize>(response: &ApiResponse<T>) -> CliResult<String> {
    serde_json::to_string_pretty(response)
        .map_err(|e| CliError::Other(format!("Failed to serialize output: {}", e)))
}

/// Writes command results either as JSON envelopes or as colored text
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: bool,
}

impl Output {
    pub fn new(json: bool, no_color: bool) -> Self {
        Self {
            json,
            color: !no_color,
        }
    }

    fn paint(&self, text: impl Display, color: Color) -> String {
        if self.color {
            text.to_string().with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn json<T: Serialize>(&self, response: &ApiResponse<T>) -> CliResult<()> {
        println!("{}", to_json(response)?);
        Ok(())
    }

    /// Confirmation without payload
    pub fn done(&self, message: &str) -> CliResult<()> {
        if self.json {
            return self.json(&ApiResponse::<()>::done(message));
        }
        println!("{}", self.paint(message, Color::Green));
        Ok(())
    }

    pub fn tags(&self, tags: &[Tag]) -> CliResult<()> {
        if self.json {
            return self.json(&ApiResponse::ok(tags));
        }
        if tags.is_empty() {
            eprintln!("No tags found");
            return Ok(());
        }
        for tag in tags {
            println!("{}", self.tag_line(tag));
        }
        Ok(())
    }

    pub fn tag(&self, tag: &Tag, message: Option<&str>) -> CliResult<()> {
        if self.json {
            return match message {
                Some(msg) => self.json(&ApiResponse::ok_with_message(tag, msg)),
                None => self.json(&ApiResponse::ok(tag)),
            };
        }
        if let Some(msg) = message {
            eprintln!("{}", self.paint(msg, Color::Green));
        }
        println!("{}", self.tag_line(tag));
        Ok(())
    }

    fn tag_line(&self, tag: &Tag) -> String {
        format!(
            "{:>4}  {}  {}",
            tag.id.unwrap_or_default(),
            self.paint(tag.name(), Color::Green),
            self.paint(tag.color(), Color::DarkGrey)
        )
    }

    pub fn services(&self, services: &[Service]) -> CliResult<()> {
        if self.json {
            return self.json(&ApiResponse::ok(services));
        }
        if services.is_empty() {
            eprintln!("No services found");
            return Ok(());
        }
        for service in services {
            println!("{}", self.service_line(service));
        }
        Ok(())
    }

    pub fn service(&self, service: &Service, message: Option<&str>) -> CliResult<()> {
        if self.json {
            return match message {
                Some(msg) => self.json(&ApiResponse::ok_with_message(service, msg)),
                None => self.json(&ApiResponse::ok(service)),
            };
        }
        if let Some(msg) = message {
            eprintln!("{}", self.paint(msg, Color::Green));
        }
        println!("{}", self.service_line(service));
        if let Some(url) = &service.external_url {
            println!("      {}", self.paint(url, Color::Blue));
        }
        Ok(())
    }

    fn service_line(&self, service: &Service) -> String {
        let status_color = match service.status.as_str() {
            "running" => Color::Green,
            "error" => Color::Red,
            "stopped" => Color::Yellow,
            _ => Color::DarkGrey,
        };
        format!(
            "{:>4}  {}  [{}] {}",
            service.id,
            self.paint(&service.name, Color::Cyan),
            service.service_type,
            self.paint(service.status, status_color)
        )
    }

    pub fn alerts(&self, alerts: &[Alert]) -> CliResult<()> {
        if self.json {
            return self.json(&ApiResponse::ok(alerts));
        }
        if alerts.is_empty() {
            eprintln!("No alerts found");
            return Ok(());
        }
        for alert in alerts {
            let scope = alert
                .service_id
                .map(|id| format!("service {}", id))
                .unwrap_or_else(|| "all services".to_string());
            println!(
                "{:>4}  {}  {}  ({})",
                alert.id.unwrap_or_default(),
                self.paint(&alert.tag_name, Color::Yellow),
                alert.title,
                scope
            );
        }
        Ok(())
    }

    pub fn alert(&self, alert: &Alert) -> CliResult<()> {
        if self.json {
            return self.json(&ApiResponse::ok_with_message(alert, "Alert recorded"));
        }
        println!("{}", self.paint(alert, Color::Yellow));
        Ok(())
    }

    pub fn audit(&self, entries: &[AuditLogEntry]) -> CliResult<()> {
        if self.json {
            return self.json(&ApiResponse::ok(entries));
        }
        if entries.is_empty() {
            eprintln!("No audit entries found");
            return Ok(());
        }
        for entry in entries {
            println!(
                "{}  {}",
                self.paint(entry.created_at.format("%Y-%m-%d %H:%M:%S"), Color::DarkGrey),
                entry
            );
        }
        Ok(())
    }
}
