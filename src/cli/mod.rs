// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::display::Output;
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::repositories::sqlite::connection::init_pool;
use crate::infrastructure::repositories::sqlite::migration::check_schema_migrations_exists;
use std::path::Path;
use tracing::{debug, instrument};

pub mod alert_commands;
pub mod args;
pub mod display;
pub mod error;
pub mod service_commands;
pub mod tag_commands;

pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }

    let out = Output::new(cli.json, cli.no_color);
    let command = match cli.command {
        Some(command) => command,
        None => return Ok(()),
    };

    if let Commands::CreateDb { path } = &command {
        return create_db(path, out);
    }

    let services = ServiceContainer::new(settings)?;
    execute_command_with_services(command, &services, settings, out)
}

pub fn execute_command_with_services(
    command: Commands,
    services: &ServiceContainer,
    settings: &Settings,
    out: Output,
) -> CliResult<()> {
    match command {
        Commands::Tags { command } => tag_commands::execute(command, services, out),
        Commands::Services { command } => {
            service_commands::execute(command, services, settings, out)
        }
        Commands::ServiceTags { command } => {
            tag_commands::execute_service_tags(command, services, out)
        }
        Commands::Alerts { command } => alert_commands::execute(command, services, out),
        Commands::Audit { limit } => alert_commands::show_audit(limit, services, out),
        Commands::CreateDb { path } => create_db(&path, out),
    }
}

#[instrument(skip(out), level = "debug")]
pub fn create_db(path: &str, out: Output) -> CliResult<()> {
    if Path::new(path).exists() {
        return Err(CliError::InvalidInput(format!(
            "Database already exists at: {}. Please choose a different path or delete the existing file.",
            path
        )));
    }

    eprintln!("Creating new database at: {}", path);

    // creates parent directories and runs all migrations
    let pool = init_pool(path)?;
    let mut conn = pool
        .get()
        .map_err(|e| CliError::CommandFailed(format!("Cannot open new database: {}", e)))?;
    if !check_schema_migrations_exists(&mut conn)? {
        return Err(CliError::CommandFailed(format!(
            "Schema was not created in {}",
            path
        )));
    }
    debug!("Schema created in {}", path);

    out.done(&format!("Database created successfully at: {}", path))
}
