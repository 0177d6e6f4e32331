// src/cli/service_commands.rs
use crate::application::error::ApplicationError;
use crate::cli::args::ServiceCommands;
use crate::cli::display::Output;
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::service::NewServiceBuilder;
use crate::infrastructure::di::ServiceContainer;
use tracing::instrument;

#[instrument(skip(services, settings, out), level = "debug")]
pub fn execute(
    command: ServiceCommands,
    services: &ServiceContainer,
    settings: &Settings,
    out: Output,
) -> CliResult<()> {
    let service_service = &services.service_service;

    match command {
        ServiceCommands::List => out.services(&service_service.get_all_services()?),
        ServiceCommands::Show { id } => {
            let service = service_service
                .get_service(id)?
                .ok_or(ApplicationError::ServiceNotFound(id))?;
            out.service(&service, None)
        }
        ServiceCommands::Create {
            name,
            provider_id,
            service_type,
            status,
            url,
        } => {
            let new_service = NewServiceBuilder::default()
                .name(name)
                .provider_id(provider_id)
                .service_type(service_type)
                .status(status)
                .external_url(url)
                .build()
                .map_err(|e| CliError::InvalidInput(e.to_string()))?;

            let service = service_service.create_service(new_service, &settings.user)?;
            out.service(&service, Some("Service created"))
        }
        ServiceCommands::Delete { id } => {
            service_service.delete_service(id, &settings.user)?;
            out.done("Service deleted successfully")
        }
    }
}
