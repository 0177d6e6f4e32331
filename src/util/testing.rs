// src/util/testing.rs

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use tempfile::TempDir;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::{ENV_DB_URL, ENV_USER_ID, ENV_USER_NAME};
use crate::infrastructure::repositories::sqlite::alert_repository::SqliteAlertRepository;
use crate::infrastructure::repositories::sqlite::audit_repository::SqliteAuditRepository;
use crate::infrastructure::repositories::sqlite::connection::{init_pool, ConnectionPool};
use crate::infrastructure::repositories::sqlite::service_repository::SqliteServiceRepository;
use crate::infrastructure::repositories::sqlite::tag_repository::SqliteTagRepository;

const ENV_VARS: [&str; 3] = [ENV_DB_URL, ENV_USER_ID, ENV_USER_NAME];

static TEST_ENV: OnceLock<()> = OnceLock::new();

/// Initializes logging for tests exactly once.
pub fn init_test_env() {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
    });
}

fn setup_test_logging() {
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["diesel", "r2d2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the OPSIMATE_* environment on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            saved: ENV_VARS.iter().map(|k| (*k, env::var(k).ok())).collect(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

/// A migrated database living in its own temp directory.
#[derive(Debug)]
pub struct TestDb {
    pub pool: ConnectionPool,
    pub path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    pub fn url(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    pub fn tag_repository(&self) -> SqliteTagRepository {
        SqliteTagRepository::new(self.pool.clone())
    }

    pub fn service_repository(&self) -> SqliteServiceRepository {
        SqliteServiceRepository::new(self.pool.clone())
    }

    pub fn alert_repository(&self) -> SqliteAlertRepository {
        SqliteAlertRepository::new(self.pool.clone())
    }

    pub fn audit_repository(&self) -> SqliteAuditRepository {
        SqliteAuditRepository::new(self.pool.clone())
    }
}

/// Creates a fresh database with all migrations applied.
pub fn setup_test_db() -> TestDb {
    init_test_env();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("opsimate.db");
    let pool = init_pool(&path.to_string_lossy()).expect("Failed to initialize test database");
    TestDb {
        pool,
        path,
        _dir: dir,
    }
}
