// src/infrastructure/repositories/sqlite/alert_repository.rs
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::alert::{Alert, AlertFilter};
use crate::domain::error::DomainError;
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::infrastructure::repositories::sqlite::model::{DbAlert, NewDbAlert};
use crate::infrastructure::repositories::sqlite::schema::alerts;

#[derive(Clone, Debug)]
pub struct SqliteAlertRepository {
    pool: ConnectionPool,
}

impl SqliteAlertRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    #[instrument(skip_all, level = "trace")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    fn to_domain_model(db_alert: DbAlert) -> Alert {
        Alert {
            id: Some(db_alert.id),
            service_id: db_alert.service_id,
            tag_name: db_alert.tag_name,
            title: db_alert.title,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db_alert.created_at, Utc),
        }
    }
}

impl AlertRepository for SqliteAlertRepository {
    #[instrument(skip_all, level = "debug", fields(tag_name = %alert.tag_name))]
    fn add(&self, alert: &mut Alert) -> Result<(), DomainError> {
        let mut conn = self.get_connection()?;

        let new_alert = NewDbAlert {
            service_id: alert.service_id,
            tag_name: alert.tag_name.clone(),
            title: alert.title.clone(),
            created_at: alert.created_at.naive_utc(),
        };

        let id = diesel::insert_into(alerts::table)
            .values(&new_alert)
            .returning(alerts::id)
            .get_result::<i32>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        alert.id = Some(id);
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn search(&self, filter: &AlertFilter) -> Result<Vec<Alert>, DomainError> {
        let mut conn = self.get_connection()?;

        let mut query = alerts::table.select(DbAlert::as_select()).into_boxed();
        if let Some(tag_name) = &filter.tag_name {
            query = query.filter(alerts::tag_name.eq(tag_name));
        }
        if let Some(service_id) = filter.service_id {
            query = query.filter(alerts::service_id.eq(service_id));
        }

        let db_alerts = query
            .order(alerts::id.asc())
            .load(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(db_alerts.into_iter().map(Self::to_domain_model).collect())
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_by_service_and_tag(
        &self,
        service_id: i32,
        tag_name: &str,
    ) -> Result<usize, DomainError> {
        let mut conn = self.get_connection()?;

        let removed = diesel::delete(
            alerts::table
                .filter(alerts::service_id.eq(service_id))
                .filter(alerts::tag_name.eq(tag_name)),
        )
        .execute(&mut conn)
        .map_err(SqliteRepositoryError::DatabaseError)?;

        debug!("Deleted {} alerts", removed);
        Ok(removed)
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_by_tag(&self, tag_name: &str) -> Result<usize, DomainError> {
        let mut conn = self.get_connection()?;

        let removed = diesel::delete(alerts::table.filter(alerts::tag_name.eq(tag_name)))
            .execute(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        debug!("Deleted {} alerts", removed);
        Ok(removed)
    }
}
