// src/domain/repositories/tag_repository.rs
use crate::domain::error::DomainError;
use crate::domain::tag::{Tag, Unlinked};

/// Persistence for tags and their links to services
pub trait TagRepository: std::fmt::Debug + Send + Sync {
    /// Get all tags ordered by name
    fn get_all(&self) -> Result<Vec<Tag>, DomainError>;

    /// Get a tag by its ID
    fn get_by_id(&self, id: i32) -> Result<Option<Tag>, DomainError>;

    /// Get a tag by its exact name
    fn get_by_name(&self, name: &str) -> Result<Option<Tag>, DomainError>;

    /// Insert a new tag and set its ID
    fn add(&self, tag: &mut Tag) -> Result<(), DomainError>;

    /// Update name and color of an existing tag
    fn update(&self, tag: &Tag) -> Result<(), DomainError>;

    /// Delete a tag together with all of its service links.
    /// Returns false if no such tag existed.
    fn delete(&self, id: i32) -> Result<bool, DomainError>;

    /// Link a tag to a service. Linking twice is a no-op.
    fn add_to_service(&self, service_id: i32, tag_id: i32) -> Result<(), DomainError>;

    /// Unlink a tag from a service and count the tag's remaining links.
    /// Both happen atomically, so concurrent unlinks of the same tag see
    /// distinct remaining counts.
    fn remove_from_service(&self, service_id: i32, tag_id: i32) -> Result<Unlinked, DomainError>;

    /// Number of services currently linked to the tag
    fn count_services_using_tag(&self, tag_id: i32) -> Result<usize, DomainError>;

    /// Tags linked to a service, ordered by name
    fn get_service_tags(&self, service_id: i32) -> Result<Vec<Tag>, DomainError>;
}
