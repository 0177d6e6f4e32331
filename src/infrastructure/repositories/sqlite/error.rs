// src/infrastructure/repositories/sqlite/error.rs

use diesel::r2d2;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::error::DomainError;

#[derive(Error, Debug)]
pub enum SqliteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DieselError),

    #[error("Diesel connection error: {0}")]
    ConnectionError(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Failed to convert entity: {0}")]
    ConversionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Repository operation failed: {0}")]
    OperationFailed(String),
}

pub type SqliteResult<T> = Result<T, SqliteRepositoryError>;

impl From<r2d2::Error> for SqliteRepositoryError {
    fn from(err: r2d2::Error) -> Self {
        SqliteRepositoryError::ConnectionPoolError(err.to_string())
    }
}

impl From<SqliteRepositoryError> for DomainError {
    fn from(err: SqliteRepositoryError) -> Self {
        match err {
            SqliteRepositoryError::DatabaseError(diesel_err) => match diesel_err {
                DieselError::NotFound => DomainError::NotFound("Resource not found".to_string()),
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
                    if info.message().contains("tags.name") =>
                {
                    DomainError::DuplicateName(info.message().to_string())
                }
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                    DomainError::RepositoryError(format!(
                        "Unique constraint violated: {}",
                        info.message()
                    ))
                }
                DieselError::DatabaseError(_, info) => {
                    DomainError::RepositoryError(format!("Database error: {}", info.message()))
                }
                _ => DomainError::RepositoryError(format!("Database error: {}", diesel_err)),
            },
            SqliteRepositoryError::ConnectionError(e) => {
                DomainError::RepositoryError(format!("Database connection error: {}", e))
            }
            SqliteRepositoryError::ConnectionPoolError(e) => {
                DomainError::RepositoryError(format!("Connection pool error: {}", e))
            }
            SqliteRepositoryError::ConversionError(e) => {
                DomainError::RepositoryError(format!("Data conversion error: {}", e))
            }
            SqliteRepositoryError::IoError(e) => DomainError::Io(e),
            SqliteRepositoryError::MigrationError(e) => {
                DomainError::RepositoryError(format!("Migration error: {}", e))
            }
            SqliteRepositoryError::OperationFailed(e) => DomainError::RepositoryError(e),
        }
    }
}
