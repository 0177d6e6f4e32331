// src/domain/tag.rs
use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};

pub const MAX_TAG_NAME_LEN: usize = 64;
pub const DEFAULT_TAG_COLOR: &str = "#3B82F6";

static COLOR_PATTERN: OnceLock<Regex> = OnceLock::new();

fn color_pattern() -> &'static Regex {
    COLOR_PATTERN.get_or_init(|| {
        Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color pattern is a valid regex")
    })
}

/// A named label attachable to any number of services.
///
/// The name is the key alerts are scoped by, so it is kept exactly as
/// entered (trimmed, case preserved) and compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: Option<i32>,
    name: String,
    color: String,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new, not yet persisted tag with validation
    pub fn new<S: AsRef<str>>(name: S, color: Option<&str>) -> DomainResult<Self> {
        Ok(Self {
            id: None,
            name: Self::validate_name(name)?,
            color: Self::validate_color(color.unwrap_or(DEFAULT_TAG_COLOR))?,
            created_at: Utc::now(),
        })
    }

    pub fn from_storage(
        id: i32,
        name: String,
        color: String,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: Some(id),
            name: Self::validate_name(name)?,
            color,
            created_at,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    /// Renames the tag. Alerts recorded under the old name keep that name.
    pub fn rename<S: AsRef<str>>(&mut self, name: S) -> DomainResult<()> {
        self.name = Self::validate_name(name)?;
        Ok(())
    }

    pub fn set_color(&mut self, color: &str) -> DomainResult<()> {
        self.color = Self::validate_color(color)?;
        Ok(())
    }

    /// Trims and checks a tag name
    pub fn validate_name<S: AsRef<str>>(name: S) -> DomainResult<String> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(DomainError::InvalidTag(
                "Tag name cannot be empty".to_string(),
            ));
        }

        if name.chars().count() > MAX_TAG_NAME_LEN {
            return Err(DomainError::InvalidTag(format!(
                "Tag name cannot be longer than {} characters",
                MAX_TAG_NAME_LEN
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(DomainError::InvalidTag(
                "Tag name cannot contain control characters".to_string(),
            ));
        }

        Ok(name.to_string())
    }

    /// Normalizes a `#RRGGBB` color to upper case
    pub fn validate_color(color: &str) -> DomainResult<String> {
        let color = color.trim();
        if !color_pattern().is_match(color) {
            return Err(DomainError::InvalidTag(format!(
                "Invalid color '{}', expected #RRGGBB",
                color
            )));
        }
        Ok(color.to_uppercase())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}: {} ({})", id, self.name, self.color),
            None => write!(f, "{} ({})", self.name, self.color),
        }
    }
}

/// Many-to-many association between a service and a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ServiceTagLink {
    pub service_id: i32,
    pub tag_id: i32,
}

/// Outcome of unlinking a tag from a service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unlinked {
    /// False if the link did not exist
    pub removed: bool,
    /// Services still linked to the tag right after the removal
    pub remaining: usize,
}
