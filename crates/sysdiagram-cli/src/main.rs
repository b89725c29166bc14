//! sysdiagram CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use sysdiagram_cli::{Args, error_adapter::ErrorAdapter};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting sysdiagram");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = sysdiagram_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &ErrorAdapter(&err))
            .expect("Writing to String buffer is infallible");

        error!(code = error_code(&err); "Diagram generation failed");
        eprintln!("{writer}");

        process::exit(1);
    }

    info!("Completed successfully");
}

fn error_code(err: &sysdiagram::SysdiagramError) -> String {
    use miette::Diagnostic;

    ErrorAdapter(err)
        .code()
        .map(|code| code.to_string())
        .unwrap_or_default()
}
