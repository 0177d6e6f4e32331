// src/cli/args.rs
use crate::domain::service::{ServiceStatus, ServiceType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Tag monitored services and keep their alerts consistent
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Print results as JSON envelopes
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long = "no-color", help = "disable colored output")]
    pub no_color: bool,

    /// Print default configuration and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new database
    CreateDb {
        /// pathname to database file
        path: String,
    },
    /// Manage tags
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Manage monitored services
    Services {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Link and unlink tags on services
    ServiceTags {
        #[command(subcommand)]
        command: ServiceTagCommands,
    },
    /// Inspect and raise alerts
    Alerts {
        #[command(subcommand)]
        command: AlertCommands,
    },
    /// Show recent audit log entries
    Audit {
        #[arg(short = 'l', long = "limit", default_value_t = 20, help = "number of entries")]
        limit: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List all tags
    List,
    /// Show a single tag
    Show { id: i32 },
    /// Create a tag
    Create {
        name: String,
        #[arg(long = "color", help = "color as #RRGGBB")]
        color: Option<String>,
    },
    /// Rename or recolor a tag
    Update {
        id: i32,
        #[arg(long = "name", help = "new name")]
        name: Option<String>,
        #[arg(long = "color", help = "new color as #RRGGBB")]
        color: Option<String>,
    },
    /// Delete a tag and clear all alerts recorded under its name
    Delete { id: i32 },
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    /// List all services
    List,
    /// Show a single service
    Show { id: i32 },
    /// Create a service
    Create {
        name: String,
        #[arg(long = "provider", default_value_t = 0, help = "provider id")]
        provider_id: i32,
        #[arg(long = "type", default_value = "manual", help = "manual, docker, systemd, kubernetes or http")]
        service_type: ServiceType,
        #[arg(long = "status", default_value = "unknown", help = "running, stopped, error or unknown")]
        status: ServiceStatus,
        #[arg(long = "url", help = "external URL")]
        url: Option<String>,
    },
    /// Delete a service and its tag links
    Delete { id: i32 },
}

#[derive(Subcommand, Debug)]
pub enum ServiceTagCommands {
    /// List tags linked to a service
    List { service_id: i32 },
    /// Link a tag to a service
    Add { service_id: i32, tag_id: i32 },
    /// Unlink a tag from a service and clear dependent alerts
    Remove { service_id: i32, tag_id: i32 },
}

#[derive(Subcommand, Debug)]
pub enum AlertCommands {
    /// List alerts
    List {
        #[arg(long = "tag", help = "only alerts recorded under this tag name")]
        tag: Option<String>,
        #[arg(long = "service", help = "only alerts of this service id")]
        service: Option<i32>,
    },
    /// Record an alert
    Raise {
        tag_name: String,
        title: String,
        #[arg(long = "service", help = "service id the alert belongs to")]
        service: Option<i32>,
    },
}
