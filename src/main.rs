use clap::Parser;
use finmate::args::{Args, Command};
use finmate::model::TargetBudget;
use finmate::{commands, error_type, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match error_type(&e) {
                Some(kind) => error!("Exiting with {kind} error: {e:#}"),
                None => error!("Exiting with error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");

    // The target budget is fixed for the life of the process.
    let budget = TargetBudget::standard();

    let _: () = match args.command() {
        Command::Analyze(analyze_args) => commands::analyze(&budget, analyze_args)?.print(),
        Command::Manual(manual_args) => commands::manual(&budget, manual_args)?.print(),
        Command::Targets => commands::targets(&budget)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
