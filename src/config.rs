use crate::domain::error::{DomainError, DomainResult};
use crate::domain::user::User;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

pub const ENV_DB_URL: &str = "OPSIMATE_DB_URL";
pub const ENV_USER_ID: &str = "OPSIMATE_USER_ID";
pub const ENV_USER_NAME: &str = "OPSIMATE_USER_NAME";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_url: String,

    /// User recorded in audit entries
    #[serde(default)]
    pub user: User,
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/opsimate")
}

fn default_db_path() -> String {
    config_dir().join("opsimate.db").to_string_lossy().to_string()
}

/// Location of the config file when `--config` is not given
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
            user: User::default(),
        }
    }
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let config_text = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Io(std::io::Error::new(
            e.kind(),
            format!("Cannot read config file {}: {}", path.display(), e),
        ))
    })?;
    toml::from_str::<Settings>(&config_text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Load settings from a config file, then apply environment overrides.
///
/// An explicit `config_path` must exist. Without one, the default location is
/// used if present.
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_path {
        Some(path) => read_config_file(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                trace!("Loading config from: {:?}", path);
                read_config_file(&path)?
            } else {
                Settings::default()
            }
        }
    };

    if let Ok(db_url) = std::env::var(ENV_DB_URL) {
        trace!("Using {} from environment: {}", ENV_DB_URL, db_url);
        settings.db_url = db_url;
    }

    if let Ok(user_id) = std::env::var(ENV_USER_ID) {
        settings.user.id = user_id.trim().parse().map_err(|_| {
            DomainError::Other(format!("Invalid {}: '{}'", ENV_USER_ID, user_id))
        })?;
    }

    if let Ok(user_name) = std::env::var(ENV_USER_NAME) {
        settings.user.full_name = user_name;
    }

    debug!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
