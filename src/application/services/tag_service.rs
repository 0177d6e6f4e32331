// src/application/services/tag_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::tag::Tag;

/// Service interface for tag-related operations
pub trait TagService: Send + Sync {
    /// Get all tags ordered by name
    fn get_all_tags(&self) -> ApplicationResult<Vec<Tag>>;

    /// Get a single tag
    fn get_tag(&self, tag_id: i32) -> ApplicationResult<Option<Tag>>;

    /// Create a tag with a unique name
    fn create_tag(&self, name: &str, color: Option<&str>) -> ApplicationResult<Tag>;

    /// Change name and/or color of an existing tag
    fn update_tag(
        &self,
        tag_id: i32,
        name: Option<&str>,
        color: Option<&str>,
    ) -> ApplicationResult<Tag>;

    /// Delete a tag, its service links and every alert recorded under its name
    fn delete_tag(&self, tag_id: i32) -> ApplicationResult<()>;

    /// Link a tag to a service
    fn add_tag_to_service(&self, service_id: i32, tag_id: i32) -> ApplicationResult<()>;

    /// Unlink a tag from a service and clear the alerts that depended on the link
    fn remove_tag_from_service(&self, service_id: i32, tag_id: i32) -> ApplicationResult<()>;

    /// Tags linked to a service, empty for an unknown service
    fn get_service_tags(&self, service_id: i32) -> ApplicationResult<Vec<Tag>>;
}
