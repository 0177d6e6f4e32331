// src/main.rs
use clap::error::ErrorKind;
use clap::Parser;
use crossterm::style::Stylize;
use opsimate::cli::args::Cli;
use opsimate::cli::display::{to_json, ApiResponse};
use opsimate::cli::error::CliError;
use opsimate::config::load_settings;
use opsimate::exitcode;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(exitcode::USAGE);
        }
    };

    setup_logging(cli.debug, cli.no_color);

    let json = cli.json;
    let no_color = cli.no_color;

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            report_error(&CliError::from(e), json, no_color);
            std::process::exit(exitcode::USAGE);
        }
    };

    if let Err(e) = opsimate::cli::execute_command(cli, &settings) {
        report_error(&e, json, no_color);
        std::process::exit(e.exit_code());
    }
}

fn report_error(error: &CliError, json: bool, no_color: bool) {
    debug!("Command failed: {:?}", error);
    if json {
        match to_json(&ApiResponse::<()>::failure(error.to_string())) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
    } else if no_color {
        eprintln!("Error: {}", error);
    } else {
        eprintln!("{}", format!("Error: {}", error).red());
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // diesel and r2d2 are chatty at trace level
    let noisy_modules = ["diesel", "r2d2", "scheduled_thread_pool"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
