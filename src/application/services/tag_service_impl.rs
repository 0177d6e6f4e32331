// src/application/services/tag_service_impl.rs
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::locks::TagLockRegistry;
use crate::application::services::tag_service::TagService;
use crate::domain::error::DomainError;
use crate::domain::repositories::service_repository::ServiceRepository;
use crate::domain::repositories::tag_repository::TagRepository;
use crate::domain::services::alert_cleanup::AlertCleanupService;
use crate::domain::tag::Tag;
use tracing::{debug, info, instrument};

pub struct TagServiceImpl<R: TagRepository, S: ServiceRepository> {
    repository: Arc<R>,
    service_repository: Arc<S>,
    alert_cleanup: Arc<dyn AlertCleanupService>,
    locks: TagLockRegistry,
}

impl<R: TagRepository, S: ServiceRepository> TagServiceImpl<R, S> {
    pub fn new(
        repository: Arc<R>,
        service_repository: Arc<S>,
        alert_cleanup: Arc<dyn AlertCleanupService>,
    ) -> Self {
        debug!("Creating new TagServiceImpl");
        Self {
            repository,
            service_repository,
            alert_cleanup,
            locks: TagLockRegistry::new(),
        }
    }

    fn validate_id(kind: &str, id: i32) -> ApplicationResult<()> {
        if id <= 0 {
            return Err(ApplicationError::Validation(format!(
                "Invalid {} ID: {}",
                kind, id
            )));
        }
        Ok(())
    }

    fn require_tag(&self, tag_id: i32) -> ApplicationResult<Tag> {
        self.repository
            .get_by_id(tag_id)?
            .ok_or(ApplicationError::TagNotFound(tag_id))
    }

    fn require_service(&self, service_id: i32) -> ApplicationResult<()> {
        match self.service_repository.get_by_id(service_id)? {
            Some(_) => Ok(()),
            None => Err(ApplicationError::ServiceNotFound(service_id)),
        }
    }

    /// Fails if another tag already carries `name`
    fn ensure_name_available(&self, name: &str, own_id: Option<i32>) -> ApplicationResult<()> {
        if let Some(existing) = self.repository.get_by_name(name)? {
            if existing.id != own_id {
                return Err(Self::name_taken());
            }
        }
        Ok(())
    }

    fn name_taken() -> ApplicationError {
        ApplicationError::Validation("Tag name already exists".to_string())
    }

    /// A concurrent writer can claim the name between check and write
    fn map_name_conflict(err: DomainError) -> ApplicationError {
        match err {
            DomainError::DuplicateName(msg) => {
                debug!("Lost race for tag name: {}", msg);
                Self::name_taken()
            }
            other => other.into(),
        }
    }
}

impl<R: TagRepository, S: ServiceRepository> TagService for TagServiceImpl<R, S> {
    #[instrument(skip(self), level = "debug", fields(repo_type = std::any::type_name::<R>()))]
    fn get_all_tags(&self) -> ApplicationResult<Vec<Tag>> {
        Ok(self.repository.get_all()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_tag(&self, tag_id: i32) -> ApplicationResult<Option<Tag>> {
        Self::validate_id("tag", tag_id)?;
        Ok(self.repository.get_by_id(tag_id)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn create_tag(&self, name: &str, color: Option<&str>) -> ApplicationResult<Tag> {
        let mut tag =
            Tag::new(name, color).map_err(|e| ApplicationError::Validation(e.to_string()))?;
        self.ensure_name_available(tag.name(), None)?;

        self.repository
            .add(&mut tag)
            .map_err(Self::map_name_conflict)?;
        info!("Created tag: {}", tag);
        Ok(tag)
    }

    #[instrument(skip(self), level = "debug")]
    fn update_tag(
        &self,
        tag_id: i32,
        name: Option<&str>,
        color: Option<&str>,
    ) -> ApplicationResult<Tag> {
        Self::validate_id("tag", tag_id)?;

        // a rename must not interleave with an unlink reading the old name
        self.locks.with_tag_lock(tag_id, || {
            let mut tag = self.require_tag(tag_id)?;

            if let Some(name) = name {
                tag.rename(name)
                    .map_err(|e| ApplicationError::Validation(e.to_string()))?;
                self.ensure_name_available(tag.name(), Some(tag_id))?;
            }
            if let Some(color) = color {
                tag.set_color(color)
                    .map_err(|e| ApplicationError::Validation(e.to_string()))?;
            }

            self.repository
                .update(&tag)
                .map_err(Self::map_name_conflict)?;
            info!("Updated tag: {}", tag);
            Ok(tag)
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_tag(&self, tag_id: i32) -> ApplicationResult<()> {
        Self::validate_id("tag", tag_id)?;

        self.locks.with_tag_lock(tag_id, || {
            let tag = self.require_tag(tag_id)?;

            if !self.repository.delete(tag_id)? {
                // removed by someone else after the lookup
                return Err(ApplicationError::TagNotFound(tag_id));
            }

            let cleared = self.alert_cleanup.clear_alerts_by_tag(tag.name())?;
            info!("Deleted tag '{}', cleared {} alerts", tag.name(), cleared);
            Ok(())
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn add_tag_to_service(&self, service_id: i32, tag_id: i32) -> ApplicationResult<()> {
        Self::validate_id("service", service_id)?;
        Self::validate_id("tag", tag_id)?;

        self.locks.with_tag_lock(tag_id, || {
            self.require_service(service_id)?;
            let tag = self.require_tag(tag_id)?;

            self.repository.add_to_service(service_id, tag_id)?;
            debug!("Linked tag '{}' to service {}", tag.name(), service_id);
            Ok(())
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn remove_tag_from_service(&self, service_id: i32, tag_id: i32) -> ApplicationResult<()> {
        Self::validate_id("service", service_id)?;
        Self::validate_id("tag", tag_id)?;

        self.locks.with_tag_lock(tag_id, || {
            let tag = self.require_tag(tag_id)?;

            let unlinked = self.repository.remove_from_service(service_id, tag_id)?;
            if !unlinked.removed {
                debug!("Tag {} was not linked to service {}", tag_id, service_id);
            }

            let cleared = self
                .alert_cleanup
                .clear_alerts_by_service_and_tag(service_id, tag.name())?;
            debug!(
                "Cleared {} alerts for service {} and tag '{}'",
                cleared,
                service_id,
                tag.name()
            );

            if unlinked.remaining == 0 {
                let cleared = self.alert_cleanup.clear_alerts_by_tag(tag.name())?;
                info!(
                    "Tag '{}' no longer used by any service, cleared {} alerts",
                    tag.name(),
                    cleared
                );
            }
            Ok(())
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn get_service_tags(&self, service_id: i32) -> ApplicationResult<Vec<Tag>> {
        Self::validate_id("service", service_id)?;
        // an unknown service simply has no tags
        Ok(self.repository.get_service_tags(service_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainResult;
    use crate::domain::repositories::service_repository::ServiceRepository;
    use crate::domain::service::NewService;
    use crate::infrastructure::repositories::sqlite::service_repository::SqliteServiceRepository;
    use crate::infrastructure::repositories::sqlite::tag_repository::SqliteTagRepository;
    use crate::util::testing::{setup_test_db, TestDb};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Cleanup {
        ServiceAndTag(i32, String),
        Tag(String),
    }

    /// Records every cleanup request, optionally failing the pair-scoped clear
    #[derive(Debug, Default)]
    struct RecordingCleanup {
        calls: Mutex<Vec<Cleanup>>,
        fail_service_and_tag: bool,
    }

    impl RecordingCleanup {
        fn failing() -> Self {
            Self {
                fail_service_and_tag: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Cleanup> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AlertCleanupService for RecordingCleanup {
        fn clear_alerts_by_service_and_tag(
            &self,
            service_id: i32,
            tag_name: &str,
        ) -> DomainResult<usize> {
            self.calls
                .lock()
                .unwrap()
                .push(Cleanup::ServiceAndTag(service_id, tag_name.to_string()));
            if self.fail_service_and_tag {
                return Err(DomainError::AlertOperationFailed(
                    "alert store unavailable".to_string(),
                ));
            }
            Ok(0)
        }

        fn clear_alerts_by_tag(&self, tag_name: &str) -> DomainResult<usize> {
            self.calls
                .lock()
                .unwrap()
                .push(Cleanup::Tag(tag_name.to_string()));
            Ok(0)
        }
    }

    struct Fixture {
        db: TestDb,
        cleanup: Arc<RecordingCleanup>,
        service: TagServiceImpl<SqliteTagRepository, SqliteServiceRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_cleanup(RecordingCleanup::default())
        }

        fn with_cleanup(cleanup: RecordingCleanup) -> Self {
            let db = setup_test_db();
            let cleanup = Arc::new(cleanup);
            let service = TagServiceImpl::new(
                Arc::new(db.tag_repository()),
                Arc::new(db.service_repository()),
                cleanup.clone(),
            );
            Self {
                db,
                cleanup,
                service,
            }
        }

        fn add_service(&self, name: &str) -> i32 {
            self.db
                .service_repository()
                .add(&NewService::named(name).unwrap())
                .unwrap()
        }

        fn add_tag(&self, name: &str) -> i32 {
            self.service.create_tag(name, None).unwrap().id.unwrap()
        }

        fn usage(&self, tag_id: i32) -> usize {
            self.db
                .tag_repository()
                .count_services_using_tag(tag_id)
                .unwrap()
        }
    }

    #[test]
    fn given_tag_on_single_service_when_unlinked_then_clears_pair_and_whole_tag() {
        // Arrange
        let f = Fixture::new();
        let s = f.add_service("api");
        let t = f.add_tag("web");
        f.service.add_tag_to_service(s, t).unwrap();

        // Act
        f.service.remove_tag_from_service(s, t).unwrap();

        // Assert
        assert_eq!(f.usage(t), 0);
        assert_eq!(
            f.cleanup.calls(),
            vec![
                Cleanup::ServiceAndTag(s, "web".to_string()),
                Cleanup::Tag("web".to_string()),
            ]
        );
    }

    #[test]
    fn given_tag_on_two_services_when_one_unlinked_then_tag_wide_clear_skipped() {
        // Arrange
        let f = Fixture::new();
        let s1 = f.add_service("api");
        let s2 = f.add_service("worker");
        let t = f.add_tag("web");
        f.service.add_tag_to_service(s1, t).unwrap();
        f.service.add_tag_to_service(s2, t).unwrap();

        // Act
        f.service.remove_tag_from_service(s1, t).unwrap();

        // Assert
        assert_eq!(f.usage(t), 1);
        assert_eq!(
            f.cleanup.calls(),
            vec![Cleanup::ServiceAndTag(s1, "web".to_string())]
        );
    }

    #[test]
    fn given_unknown_tag_when_unlinked_then_not_found_and_nothing_touched() {
        // Arrange
        let f = Fixture::new();
        let s = f.add_service("api");
        let t = f.add_tag("web");
        f.service.add_tag_to_service(s, t).unwrap();

        // Act
        let result = f.service.remove_tag_from_service(s, 9999);

        // Assert
        assert!(matches!(result, Err(ApplicationError::TagNotFound(9999))));
        assert_eq!(f.usage(t), 1);
        assert!(f.cleanup.calls().is_empty());
    }

    #[test]
    fn given_tag_on_three_services_when_deleted_then_tag_cleared_once() {
        // Arrange
        let f = Fixture::new();
        let t = f.add_tag("web");
        for name in ["a", "b", "c"] {
            let s = f.add_service(name);
            f.service.add_tag_to_service(s, t).unwrap();
        }

        // Act
        f.service.delete_tag(t).unwrap();

        // Assert
        assert!(f.service.get_tag(t).unwrap().is_none());
        assert_eq!(f.usage(t), 0);
        assert_eq!(f.cleanup.calls(), vec![Cleanup::Tag("web".to_string())]);
    }

    #[test]
    fn given_link_already_removed_when_unlinked_again_then_ok_and_clears_repeat() {
        // Arrange
        let f = Fixture::new();
        let s = f.add_service("api");
        let t = f.add_tag("web");
        f.service.add_tag_to_service(s, t).unwrap();
        f.service.remove_tag_from_service(s, t).unwrap();

        // Act
        let result = f.service.remove_tag_from_service(s, t);

        // Assert
        assert!(result.is_ok());
        let pair = Cleanup::ServiceAndTag(s, "web".to_string());
        let whole = Cleanup::Tag("web".to_string());
        assert_eq!(
            f.cleanup.calls(),
            vec![pair.clone(), whole.clone(), pair, whole]
        );
    }

    #[test]
    fn given_two_tags_when_each_processed_then_cleanup_uses_exact_own_name() {
        // Arrange
        let f = Fixture::new();
        let s = f.add_service("api");
        let web = f.add_tag("web");
        let db = f.add_tag("database");
        f.service.add_tag_to_service(s, web).unwrap();
        f.service.add_tag_to_service(s, db).unwrap();

        // Act
        f.service.remove_tag_from_service(s, web).unwrap();
        f.service.delete_tag(db).unwrap();

        // Assert
        assert_eq!(
            f.cleanup.calls(),
            vec![
                Cleanup::ServiceAndTag(s, "web".to_string()),
                Cleanup::Tag("web".to_string()),
                Cleanup::Tag("database".to_string()),
            ]
        );
    }

    #[test]
    fn given_failing_pair_clear_when_unlinked_then_error_propagates_and_link_stays_removed() {
        // Arrange
        let f = Fixture::with_cleanup(RecordingCleanup::failing());
        let s = f.add_service("api");
        let t = f.add_tag("web");
        f.service.add_tag_to_service(s, t).unwrap();

        // Act
        let result = f.service.remove_tag_from_service(s, t);

        // Assert
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::AlertOperationFailed(_)))
        ));
        assert_eq!(f.usage(t), 0);
        assert_eq!(
            f.cleanup.calls(),
            vec![Cleanup::ServiceAndTag(s, "web".to_string())]
        );
    }

    #[test]
    fn given_non_positive_ids_when_unlinked_then_validation_error() {
        let f = Fixture::new();

        assert!(matches!(
            f.service.remove_tag_from_service(0, 1),
            Err(ApplicationError::Validation(_))
        ));
        assert!(matches!(
            f.service.remove_tag_from_service(1, -3),
            Err(ApplicationError::Validation(_))
        ));
        assert!(f.cleanup.calls().is_empty());
    }

    #[test]
    fn given_unknown_service_or_tag_when_linked_then_matching_not_found() {
        let f = Fixture::new();
        let s = f.add_service("api");
        let t = f.add_tag("web");

        // service is checked first
        assert!(matches!(
            f.service.add_tag_to_service(4242, 9999),
            Err(ApplicationError::ServiceNotFound(4242))
        ));
        assert!(matches!(
            f.service.add_tag_to_service(s, 9999),
            Err(ApplicationError::TagNotFound(9999))
        ));

        f.service.add_tag_to_service(s, t).unwrap();
        f.service.add_tag_to_service(s, t).unwrap();
        assert_eq!(f.usage(t), 1);
    }

    #[test]
    fn given_existing_name_when_create_or_rename_then_rejected() {
        let f = Fixture::new();
        f.add_tag("web");
        let other = f.add_tag("db");

        let created = f.service.create_tag("  web ", None);
        assert!(matches!(created, Err(ApplicationError::Validation(msg)) if msg == "Tag name already exists"));

        let renamed = f.service.update_tag(other, Some("web"), None);
        assert!(matches!(renamed, Err(ApplicationError::Validation(_))));

        // keeping its own name is fine
        let same = f.service.update_tag(other, Some("db"), Some("#00ff00")).unwrap();
        assert_eq!(same.color(), "#00FF00");
    }

    #[test]
    fn given_racing_creates_of_same_name_when_done_then_one_wins_rest_are_validation() {
        let f = Fixture::new();

        for round in 0..25 {
            let name = format!("race-{}", round);
            let results: Vec<ApplicationResult<Tag>> = std::thread::scope(|scope| {
                let handles: Vec<_> = (0..4)
                    .map(|_| {
                        let service = &f.service;
                        let name = name.as_str();
                        scope.spawn(move || service.create_tag(name, None))
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            for err in results.into_iter().filter_map(Result::err) {
                assert!(
                    matches!(&err, ApplicationError::Validation(msg) if msg == "Tag name already exists"),
                    "unexpected error: {}",
                    err
                );
            }
        }
    }

    #[test]
    fn given_racing_renames_to_same_name_when_done_then_loser_gets_validation() {
        let f = Fixture::new();

        for round in 0..25 {
            let a = f.add_tag(&format!("a-{}", round));
            let b = f.add_tag(&format!("b-{}", round));
            let target = format!("target-{}", round);

            let results: Vec<ApplicationResult<Tag>> = std::thread::scope(|scope| {
                let handles: Vec<_> = [a, b]
                    .into_iter()
                    .map(|id| {
                        let service = &f.service;
                        let target = target.as_str();
                        scope.spawn(move || service.update_tag(id, Some(target), None))
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert!(results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| matches!(e, ApplicationError::Validation(_))));
        }
    }

    #[test]
    fn given_invalid_input_when_create_tag_then_validation_error() {
        let f = Fixture::new();

        assert!(matches!(
            f.service.create_tag("", None),
            Err(ApplicationError::Validation(_))
        ));
        assert!(matches!(
            f.service.create_tag("web", Some("blue")),
            Err(ApplicationError::Validation(_))
        ));
    }

    #[test]
    fn given_missing_tag_when_updated_or_deleted_then_tag_not_found() {
        let f = Fixture::new();

        assert!(matches!(
            f.service.update_tag(77, Some("x"), None),
            Err(ApplicationError::TagNotFound(77))
        ));
        assert!(matches!(
            f.service.delete_tag(77),
            Err(ApplicationError::TagNotFound(77))
        ));
        assert!(f.cleanup.calls().is_empty());
    }

    #[test]
    fn given_linked_tags_when_get_service_tags_then_sorted_by_name() {
        let f = Fixture::new();
        let s = f.add_service("api");
        let zeta = f.add_tag("zeta");
        let alpha = f.add_tag("alpha");
        f.service.add_tag_to_service(s, zeta).unwrap();
        f.service.add_tag_to_service(s, alpha).unwrap();

        let names: Vec<String> = f
            .service
            .get_service_tags(s)
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);

        assert!(f.service.get_service_tags(s + 100).unwrap().is_empty());
        assert!(matches!(
            f.service.get_service_tags(0),
            Err(ApplicationError::Validation(_))
        ));
    }

    #[test]
    fn given_concurrent_unlinks_of_shared_tag_when_done_then_tag_wide_clear_runs_once() {
        let f = Fixture::new();
        let t = f.add_tag("web");
        let services: Vec<i32> = (0..4).map(|i| f.add_service(&format!("s{}", i))).collect();
        for s in &services {
            f.service.add_tag_to_service(*s, t).unwrap();
        }

        std::thread::scope(|scope| {
            for s in &services {
                let service = &f.service;
                scope.spawn(move || service.remove_tag_from_service(*s, t).unwrap());
            }
        });

        let tag_wide = f
            .cleanup
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Cleanup::Tag(_)))
            .count();
        assert_eq!(tag_wide, 1);
        assert_eq!(f.usage(t), 0);
    }
}
