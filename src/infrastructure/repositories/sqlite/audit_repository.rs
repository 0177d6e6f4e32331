// src/infrastructure/repositories/sqlite/audit_repository.rs
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::instrument;

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::audit::{AuditAction, AuditActionType, AuditLogEntry, AuditResourceType};
use crate::domain::error::DomainError;
use crate::domain::repositories::audit_repository::AuditRepository;
use crate::infrastructure::repositories::sqlite::model::{DbAuditLog, NewDbAuditLog};
use crate::infrastructure::repositories::sqlite::schema::audit_logs;

#[derive(Clone, Debug)]
pub struct SqliteAuditRepository {
    pool: ConnectionPool,
}

impl SqliteAuditRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    #[instrument(skip_all, level = "trace")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    fn to_domain_model(db_entry: DbAuditLog) -> SqliteResult<AuditLogEntry> {
        let action_type = db_entry
            .action_type
            .parse::<AuditActionType>()
            .map_err(|e| SqliteRepositoryError::ConversionError(e.to_string()))?;
        let resource_type = db_entry
            .resource_type
            .parse::<AuditResourceType>()
            .map_err(|e| SqliteRepositoryError::ConversionError(e.to_string()))?;

        Ok(AuditLogEntry {
            id: db_entry.id,
            action: AuditAction {
                action_type,
                resource_type,
                resource_id: db_entry.resource_id,
                user_id: db_entry.user_id,
                user_name: db_entry.user_name,
                resource_name: db_entry.resource_name,
            },
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db_entry.created_at, Utc),
        })
    }
}

impl AuditRepository for SqliteAuditRepository {
    #[instrument(skip_all, level = "debug", fields(action = action.action_type.as_str()))]
    fn add(&self, action: &AuditAction) -> Result<i32, DomainError> {
        let mut conn = self.get_connection()?;

        let new_entry = NewDbAuditLog {
            action_type: action.action_type.as_str().to_string(),
            resource_type: action.resource_type.as_str().to_string(),
            resource_id: action.resource_id.clone(),
            user_id: action.user_id,
            user_name: action.user_name.clone(),
            resource_name: action.resource_name.clone(),
            created_at: Utc::now().naive_utc(),
        };

        let id = diesel::insert_into(audit_logs::table)
            .values(&new_entry)
            .returning(audit_logs::id)
            .get_result::<i32>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(id)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, DomainError> {
        let mut conn = self.get_connection()?;

        let db_entries = audit_logs::table
            .order(audit_logs::id.desc())
            .limit(limit as i64)
            .select(DbAuditLog::as_select())
            .load(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        let entries = db_entries
            .into_iter()
            .map(Self::to_domain_model)
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(entries)
    }
}
