use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::alert_service::AlertService;
use crate::application::services::audit_service::AuditService;
use crate::application::services::service_service::ServiceService;
use crate::application::services::tag_service::TagService;
use crate::application::{AlertServiceImpl, AuditServiceImpl, ServiceServiceImpl, TagServiceImpl};
use crate::config::Settings;
use crate::domain::services::alert_cleanup::AlertCleanupService;
use crate::infrastructure::repositories::sqlite::alert_repository::SqliteAlertRepository;
use crate::infrastructure::repositories::sqlite::audit_repository::SqliteAuditRepository;
use crate::infrastructure::repositories::sqlite::connection::{init_pool, ConnectionPool};
use crate::infrastructure::repositories::sqlite::service_repository::SqliteServiceRepository;
use crate::infrastructure::repositories::sqlite::tag_repository::SqliteTagRepository;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub tag_service: Arc<dyn TagService>,
    pub service_service: Arc<dyn ServiceService>,
    pub alert_service: Arc<dyn AlertService>,
    pub audit_service: Arc<dyn AuditService>,
}

impl ServiceContainer {
    /// Open the configured database and wire all services on one pool
    #[instrument(skip_all, level = "debug", fields(db_url = %config.db_url))]
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        if !Path::new(&config.db_url).exists() {
            return Err(ApplicationError::Other(format!(
                "Database not found at '{}'. Create one with 'opsimate create-db <path>' \
                 and point OPSIMATE_DB_URL or db_url in the config file at it",
                config.db_url
            )));
        }

        // runs pending migrations
        let pool = init_pool(&config.db_url).map_err(|e| {
            ApplicationError::Other(format!("Failed to open database: {}", e))
        })?;

        Ok(Self::with_pool(pool))
    }

    /// Wire all services on an existing pool
    pub fn with_pool(pool: ConnectionPool) -> Self {
        debug!("Wiring services");
        let tag_repository = Arc::new(SqliteTagRepository::new(pool.clone()));
        let service_repository = Arc::new(SqliteServiceRepository::new(pool.clone()));
        let alert_repository = Arc::new(SqliteAlertRepository::new(pool.clone()));
        let audit_repository = Arc::new(SqliteAuditRepository::new(pool));

        let alerts = Arc::new(AlertServiceImpl::new(alert_repository));
        let audit_service: Arc<dyn AuditService> =
            Arc::new(AuditServiceImpl::new(audit_repository));

        let tag_service = Arc::new(TagServiceImpl::new(
            tag_repository,
            service_repository.clone(),
            alerts.clone() as Arc<dyn AlertCleanupService>,
        ));

        let service_service = Arc::new(ServiceServiceImpl::new(
            service_repository,
            audit_service.clone(),
        ));

        Self {
            tag_service,
            service_service,
            alert_service: alerts,
            audit_service,
        }
    }
}
