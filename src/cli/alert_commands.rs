// src/cli/alert_commands.rs
use crate::cli::args::AlertCommands;
use crate::cli::display::Output;
use crate::cli::error::CliResult;
use crate::domain::alert::AlertFilter;
use crate::infrastructure::di::ServiceContainer;
use tracing::instrument;

#[instrument(skip(services, out), level = "debug")]
pub fn execute(command: AlertCommands, services: &ServiceContainer, out: Output) -> CliResult<()> {
    let alert_service = &services.alert_service;

    match command {
        AlertCommands::List { tag, service } => {
            let filter = AlertFilter {
                tag_name: tag,
                service_id: service,
            };
            out.alerts(&alert_service.get_alerts(&filter)?)
        }
        AlertCommands::Raise {
            tag_name,
            title,
            service,
        } => {
            let alert = alert_service.record_alert(service, &tag_name, &title)?;
            out.alert(&alert)
        }
    }
}

#[instrument(skip(services, out), level = "debug")]
pub fn show_audit(limit: usize, services: &ServiceContainer, out: Output) -> CliResult<()> {
    out.audit(&services.audit_service.get_recent(limit)?)
}
