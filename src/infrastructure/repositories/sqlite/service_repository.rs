// src/infrastructure/repositories/sqlite/service_repository.rs
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::error::DomainError;
use crate::domain::repositories::service_repository::ServiceRepository;
use crate::domain::service::{NewService, Service, ServiceStatus, ServiceType};
use crate::infrastructure::repositories::sqlite::model::{DbService, NewDbService};
use crate::infrastructure::repositories::sqlite::schema::{service_tags, services};

#[derive(Clone, Debug)]
pub struct SqliteServiceRepository {
    pool: ConnectionPool,
}

impl SqliteServiceRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    #[instrument(skip_all, level = "trace")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    fn to_domain_model(&self, db_service: DbService) -> SqliteResult<Service> {
        let service_type = db_service.service_type.parse::<ServiceType>().map_err(|e| {
            SqliteRepositoryError::ConversionError(format!(
                "Service {} has invalid type: {}",
                db_service.id, e
            ))
        })?;
        let status = db_service.status.parse::<ServiceStatus>().map_err(|e| {
            SqliteRepositoryError::ConversionError(format!(
                "Service {} has invalid status: {}",
                db_service.id, e
            ))
        })?;

        Ok(Service {
            id: db_service.id,
            name: db_service.name,
            provider_id: db_service.provider_id,
            service_type,
            status,
            external_url: db_service.external_url,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db_service.created_at, Utc),
        })
    }
}

impl ServiceRepository for SqliteServiceRepository {
    #[instrument(skip_all, level = "debug")]
    fn get_all(&self) -> Result<Vec<Service>, DomainError> {
        let mut conn = self.get_connection()?;

        let db_services = services::table
            .order(services::id.asc())
            .select(DbService::as_select())
            .load(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        let services = db_services
            .into_iter()
            .map(|s| self.to_domain_model(s))
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(services)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_by_id(&self, id: i32) -> Result<Option<Service>, DomainError> {
        let mut conn = self.get_connection()?;

        let result = services::table
            .find(id)
            .select(DbService::as_select())
            .first(&mut conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        match result {
            Some(db_service) => Ok(Some(self.to_domain_model(db_service)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip_all, level = "debug", fields(name = %service.name))]
    fn add(&self, service: &NewService) -> Result<i32, DomainError> {
        let mut conn = self.get_connection()?;

        let new_service = NewDbService {
            name: service.name.clone(),
            provider_id: service.provider_id,
            service_type: service.service_type.as_str().to_string(),
            status: service.status.as_str().to_string(),
            external_url: service.external_url.clone(),
            created_at: Utc::now().naive_utc(),
        };

        let id = diesel::insert_into(services::table)
            .values(&new_service)
            .returning(services::id)
            .get_result::<i32>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        debug!("Inserted service {} with id {}", new_service.name, id);
        Ok(id)
    }

    #[instrument(skip(self), level = "debug")]
    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut conn = self.get_connection()?;

        let deleted = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                diesel::delete(service_tags::table.filter(service_tags::service_id.eq(id)))
                    .execute(conn)?;
                diesel::delete(services::table.find(id)).execute(conn)
            })
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(deleted > 0)
    }
}
