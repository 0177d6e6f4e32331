// src/infrastructure/repositories/sqlite/tag_repository.rs
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::error::DomainError;
use crate::domain::repositories::tag_repository::TagRepository;
use crate::domain::tag::{Tag, Unlinked};
use crate::infrastructure::repositories::sqlite::model::{
    DbServiceTag, DbTag, DbTagChanges, NewDbTag,
};
use crate::infrastructure::repositories::sqlite::schema::{service_tags, tags};

#[derive(Clone, Debug)]
pub struct SqliteTagRepository {
    pool: ConnectionPool,
}

impl SqliteTagRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    #[instrument(skip_all, level = "trace")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    fn to_domain_model(&self, db_tag: DbTag) -> SqliteResult<Tag> {
        let created_at = DateTime::<Utc>::from_naive_utc_and_offset(db_tag.created_at, Utc);
        Tag::from_storage(db_tag.id, db_tag.name, db_tag.color, created_at).map_err(|e| {
            SqliteRepositoryError::ConversionError(format!(
                "Failed to create domain tag from DB model for ID {}: {}",
                db_tag.id, e
            ))
        })
    }

    fn to_domain_models(&self, db_tags: Vec<DbTag>) -> SqliteResult<Vec<Tag>> {
        db_tags
            .into_iter()
            .map(|db_tag| self.to_domain_model(db_tag))
            .collect()
    }
}

impl TagRepository for SqliteTagRepository {
    #[instrument(skip_all, level = "debug")]
    fn get_all(&self) -> Result<Vec<Tag>, DomainError> {
        let mut conn = self.get_connection()?;

        let db_tags = tags::table
            .order(tags::name.asc())
            .select(DbTag::as_select())
            .load(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(self.to_domain_models(db_tags)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_by_id(&self, id: i32) -> Result<Option<Tag>, DomainError> {
        let mut conn = self.get_connection()?;

        let result = tags::table
            .find(id)
            .select(DbTag::as_select())
            .first(&mut conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        match result {
            Some(db_tag) => Ok(Some(self.to_domain_model(db_tag)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), level = "debug")]
    fn get_by_name(&self, name: &str) -> Result<Option<Tag>, DomainError> {
        let mut conn = self.get_connection()?;

        let result = tags::table
            .filter(tags::name.eq(name))
            .select(DbTag::as_select())
            .first(&mut conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        match result {
            Some(db_tag) => Ok(Some(self.to_domain_model(db_tag)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip_all, level = "debug", fields(name = %tag.name()))]
    fn add(&self, tag: &mut Tag) -> Result<(), DomainError> {
        let mut conn = self.get_connection()?;

        let new_tag = NewDbTag {
            name: tag.name().to_string(),
            color: tag.color().to_string(),
            created_at: tag.created_at.naive_utc(),
        };

        let id = diesel::insert_into(tags::table)
            .values(&new_tag)
            .returning(tags::id)
            .get_result::<i32>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        debug!("Inserted tag {} with id {}", new_tag.name, id);
        tag.set_id(id);
        Ok(())
    }

    #[instrument(skip_all, level = "debug", fields(id = ?tag.id))]
    fn update(&self, tag: &Tag) -> Result<(), DomainError> {
        let id = tag.id.ok_or_else(|| {
            SqliteRepositoryError::OperationFailed("Tag has no ID".to_string())
        })?;
        let mut conn = self.get_connection()?;

        let changes = DbTagChanges {
            name: tag.name().to_string(),
            color: tag.color().to_string(),
        };

        let result = diesel::update(tags::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        if result == 0 {
            return Err(DomainError::NotFound(format!("Tag {}", id)));
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut conn = self.get_connection()?;

        let deleted = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                let links = diesel::delete(service_tags::table.filter(service_tags::tag_id.eq(id)))
                    .execute(conn)?;
                debug!("Removed {} service links of tag {}", links, id);

                diesel::delete(tags::table.find(id)).execute(conn)
            })
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(deleted > 0)
    }

    #[instrument(skip(self), level = "debug")]
    fn add_to_service(&self, service_id: i32, tag_id: i32) -> Result<(), DomainError> {
        let mut conn = self.get_connection()?;

        let inserted = diesel::insert_or_ignore_into(service_tags::table)
            .values(&DbServiceTag { service_id, tag_id })
            .execute(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        if inserted == 0 {
            debug!("Tag {} already linked to service {}", tag_id, service_id);
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn remove_from_service(&self, service_id: i32, tag_id: i32) -> Result<Unlinked, DomainError> {
        let mut conn = self.get_connection()?;

        // takes the write lock up front so no other connection can unlink in between
        let unlinked = conn
            .immediate_transaction::<_, diesel::result::Error, _>(|conn| {
                let removed = diesel::delete(
                    service_tags::table
                        .filter(service_tags::service_id.eq(service_id))
                        .filter(service_tags::tag_id.eq(tag_id)),
                )
                .execute(conn)?;

                let remaining = service_tags::table
                    .filter(service_tags::tag_id.eq(tag_id))
                    .count()
                    .get_result::<i64>(conn)?;

                Ok(Unlinked {
                    removed: removed > 0,
                    remaining: remaining as usize,
                })
            })
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(unlinked)
    }

    #[instrument(skip(self), level = "debug")]
    fn count_services_using_tag(&self, tag_id: i32) -> Result<usize, DomainError> {
        let mut conn = self.get_connection()?;

        let count = service_tags::table
            .filter(service_tags::tag_id.eq(tag_id))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(count as usize)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_service_tags(&self, service_id: i32) -> Result<Vec<Tag>, DomainError> {
        let mut conn = self.get_connection()?;

        let db_tags = tags::table
            .inner_join(service_tags::table)
            .filter(service_tags::service_id.eq(service_id))
            .order(tags::name.asc())
            .select(DbTag::as_select())
            .load(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(self.to_domain_models(db_tags)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::service_repository::ServiceRepository;
    use crate::domain::service::NewService;
    use crate::infrastructure::repositories::sqlite::connection::init_pool;
    use crate::util::testing::setup_test_db;

    fn add_tag(repo: &SqliteTagRepository, name: &str) -> Result<Tag, DomainError> {
        let mut tag = Tag::new(name, None)?;
        repo.add(&mut tag)?;
        Ok(tag)
    }

    #[test]
    fn test_add_and_get_by_id() -> Result<(), DomainError> {
        let db = setup_test_db();
        let repo = db.tag_repository();

        let tag = add_tag(&repo, "production")?;
        assert!(tag.id.is_some());

        let retrieved = repo.get_by_id(tag.id.unwrap())?.unwrap();
        assert_eq!(retrieved.name(), "production");
        assert_eq!(retrieved.color(), tag.color());

        assert!(repo.get_by_id(9999)?.is_none());
        Ok(())
    }

    #[test]
    fn test_get_all_is_ordered_by_name() -> Result<(), DomainError> {
        let db = setup_test_db();
        let repo = db.tag_repository();

        add_tag(&repo, "zeta")?;
        add_tag(&repo, "alpha")?;
        add_tag(&repo, "mid")?;

        let names: Vec<String> = repo
            .get_all()?
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        Ok(())
    }

    #[test]
    fn test_duplicate_name_is_rejected_by_storage() -> Result<(), DomainError> {
        let db = setup_test_db();
        let repo = db.tag_repository();

        add_tag(&repo, "web")?;
        let result = add_tag(&repo, "web");
        assert!(matches!(result, Err(DomainError::DuplicateName(_))));

        let mut other = add_tag(&repo, "db")?;
        other.rename("web")?;
        assert!(matches!(
            repo.update(&other),
            Err(DomainError::DuplicateName(_))
        ));
        Ok(())
    }

    #[test]
    fn test_update_and_get_by_name() -> Result<(), DomainError> {
        let db = setup_test_db();
        let repo = db.tag_repository();

        let mut tag = add_tag(&repo, "old")?;
        tag.rename("new")?;
        tag.set_color("#000000")?;
        repo.update(&tag)?;

        assert!(repo.get_by_name("old")?.is_none());
        let updated = repo.get_by_name("new")?.unwrap();
        assert_eq!(updated.id, tag.id);
        assert_eq!(updated.color(), "#000000");
        Ok(())
    }

    #[test]
    fn test_update_missing_tag_returns_not_found() -> Result<(), DomainError> {
        let db = setup_test_db();
        let repo = db.tag_repository();

        let tag = Tag::from_storage(4242, "ghost".to_string(), "#FFFFFF".to_string(), Utc::now())?;
        assert!(matches!(repo.update(&tag), Err(DomainError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn test_links_count_and_service_tags() -> Result<(), DomainError> {
        let db = setup_test_db();
        let repo = db.tag_repository();
        let services = db.service_repository();

        let s1 = services.add(&NewService::named("api")?)?;
        let s2 = services.add(&NewService::named("worker")?)?;
        let web = add_tag(&repo, "web")?;
        let db_tag = add_tag(&repo, "db")?;
        let web_id = web.id.unwrap();

        repo.add_to_service(s1, web_id)?;
        repo.add_to_service(s1, web_id)?; // second insert ignored
        repo.add_to_service(s2, web_id)?;
        repo.add_to_service(s1, db_tag.id.unwrap())?;

        assert_eq!(repo.count_services_using_tag(web_id)?, 2);

        let s1_tags: Vec<String> = repo
            .get_service_tags(s1)?
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(s1_tags, vec!["db", "web"]);

        assert_eq!(
            repo.remove_from_service(s1, web_id)?,
            Unlinked {
                removed: true,
                remaining: 1
            }
        );
        assert_eq!(
            repo.remove_from_service(s1, web_id)?,
            Unlinked {
                removed: false,
                remaining: 1
            }
        );
        assert_eq!(repo.count_services_using_tag(web_id)?, 1);
        Ok(())
    }

    #[test]
    fn test_delete_removes_links() -> Result<(), DomainError> {
        let db = setup_test_db();
        let repo = db.tag_repository();
        let services = db.service_repository();

        let s1 = services.add(&NewService::named("api")?)?;
        let tag = add_tag(&repo, "web")?;
        let tag_id = tag.id.unwrap();
        repo.add_to_service(s1, tag_id)?;

        assert!(repo.delete(tag_id)?);
        assert!(repo.get_by_id(tag_id)?.is_none());
        assert_eq!(repo.count_services_using_tag(tag_id)?, 0);
        assert!(repo.get_service_tags(s1)?.is_empty());

        assert!(!repo.delete(tag_id)?);
        Ok(())
    }

    #[test]
    fn test_concurrent_unlinks_see_distinct_remaining_counts() -> Result<(), DomainError> {
        let db = setup_test_db();
        let services = db.service_repository();
        let tag = add_tag(&db.tag_repository(), "web")?;
        let tag_id = tag.id.unwrap();

        let mut service_ids = Vec::new();
        for i in 0..6 {
            let id = services.add(&NewService::named(format!("s{}", i))?)?;
            db.tag_repository().add_to_service(id, tag_id)?;
            service_ids.push(id);
        }

        // separate repositories share nothing but the database file
        let mut remaining: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = service_ids
                .iter()
                .map(|&service_id| {
                    let repo = SqliteTagRepository::new(init_pool(&db.url()).unwrap());
                    scope.spawn(move || repo.remove_from_service(service_id, tag_id).unwrap())
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().remaining)
                .collect()
        });

        remaining.sort_unstable();
        assert_eq!(remaining, vec![0, 1, 2, 3, 4, 5]);
        Ok(())
    }
}
