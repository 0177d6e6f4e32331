// src/infrastructure/repositories/sqlite/migration.rs
use crate::infrastructure::repositories::sqlite::error::SqliteRepositoryError;
use diesel::{RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use tracing::instrument;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Checks if the schema migrations table exists
#[instrument(skip(conn), level = "debug")]
pub fn check_schema_migrations_exists(
    conn: &mut SqliteConnection,
) -> Result<bool, SqliteRepositoryError> {
    use diesel::sql_query;
    use diesel::sql_types::Integer;
    use diesel::QueryableByName;

    #[derive(QueryableByName, Debug)]
    struct TableCheckResult {
        #[diesel(sql_type = Integer)]
        pub table_exists: i32,
    }

    let query = "
        SELECT COUNT(*) as table_exists
        FROM sqlite_master
        WHERE type='table' AND name='__diesel_schema_migrations'
    ";

    let result: TableCheckResult = sql_query(query)
        .get_result(conn)
        .map_err(SqliteRepositoryError::DatabaseError)?;

    Ok(result.table_exists > 0)
}
