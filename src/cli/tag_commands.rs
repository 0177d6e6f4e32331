// src/cli/tag_commands.rs
use crate::application::error::ApplicationError;
use crate::cli::args::{ServiceTagCommands, TagCommands};
use crate::cli::display::Output;
use crate::cli::error::CliResult;
use crate::infrastructure::di::ServiceContainer;
use tracing::instrument;

#[instrument(skip(services, out), level = "debug")]
pub fn execute(command: TagCommands, services: &ServiceContainer, out: Output) -> CliResult<()> {
    let tag_service = &services.tag_service;

    match command {
        TagCommands::List => out.tags(&tag_service.get_all_tags()?),
        TagCommands::Show { id } => {
            let tag = tag_service
                .get_tag(id)?
                .ok_or(ApplicationError::TagNotFound(id))?;
            out.tag(&tag, None)
        }
        TagCommands::Create { name, color } => {
            let tag = tag_service.create_tag(&name, color.as_deref())?;
            out.tag(&tag, Some("Tag created"))
        }
        TagCommands::Update { id, name, color } => {
            if name.is_none() && color.is_none() {
                return Err(ApplicationError::Validation(
                    "Nothing to update, pass --name and/or --color".to_string(),
                )
                .into());
            }
            let tag = tag_service.update_tag(id, name.as_deref(), color.as_deref())?;
            out.tag(&tag, Some("Tag updated"))
        }
        TagCommands::Delete { id } => {
            tag_service.delete_tag(id)?;
            out.done("Tag deleted successfully")
        }
    }
}

#[instrument(skip(services, out), level = "debug")]
pub fn execute_service_tags(
    command: ServiceTagCommands,
    services: &ServiceContainer,
    out: Output,
) -> CliResult<()> {
    let tag_service = &services.tag_service;

    match command {
        ServiceTagCommands::List { service_id } => {
            out.tags(&tag_service.get_service_tags(service_id)?)
        }
        ServiceTagCommands::Add { service_id, tag_id } => {
            tag_service.add_tag_to_service(service_id, tag_id)?;
            out.done("Tag added to service successfully")
        }
        ServiceTagCommands::Remove { service_id, tag_id } => {
            tag_service
                .remove_tag_from_service(service_id, tag_id)
                .map_err(|e| e.context(format!("Removing tag {} from service {}", tag_id, service_id)))?;
            out.done("Tag removed from service successfully")
        }
    }
}
