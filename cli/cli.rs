mod cli_args;
mod commands;
mod output;
mod prompt;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use colored::*;
use log;
use std::process;

use cbfg_core::AppError;
use cli_args::Cli;

fn main() {
    let cli_args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => process::exit(handle_parse_error(e)),
    };

    setup_logging(cli_args.quiet, cli_args.verbose);
    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(&cli_args) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            // --quiet only silences info and success lines; fatal errors
            // always reach stderr.
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code_for(&e)
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

/// Help and version exit 0. A missing directory argument prints usage and
/// exits 1; every other usage error keeps clap's own code.
fn handle_parse_error(e: clap::Error) -> i32 {
    let code = match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        | ErrorKind::MissingRequiredArgument => 1,
        _ => e.exit_code(),
    };
    if let Err(print_err) = e.print() {
        eprintln!("Failed to print usage: {}", print_err);
    }
    code
}

fn exit_code_for(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<AppError>() {
        Some(AppError::RootAccess { .. }) => 1,
        Some(AppError::NotADirectory { .. }) => 1,
        Some(AppError::Config(_)) => 2,
        Some(AppError::InvalidArgument(_)) => 2,
        Some(_) => 1,
        None => 1,
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: &Cli) -> Result<()> {
    log::debug!("Executing bundle command...");
    commands::bundle::handle_bundle_command(cli)
}
