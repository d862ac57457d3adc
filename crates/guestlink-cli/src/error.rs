use anyhow::Error;
use guestlink_config::ConfigError;
use guestlink_core::CoreError;
use guestlink_sync::SyncError;
use std::io;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(CliError::InvalidInput(_)) = cause.downcast_ref::<CliError>() {
            return EXIT_INVALID_INPUT;
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if let Some(sync_err) = cause.downcast_ref::<SyncError>() {
            return sync_exit_code(sync_err);
        }
        if cause.downcast_ref::<CoreError>().is_some() {
            return EXIT_INVALID_INPUT;
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return io_exit_code(io_err);
        }
    }
    EXIT_FAILURE
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::MissingConfigFile(_) => EXIT_NOT_FOUND,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::InvalidSeparators(_)
        | ConfigError::InvalidPhone(_)
        | ConfigError::EmptyPath { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn sync_exit_code(err: &SyncError) -> u8 {
    match err {
        SyncError::Read { source, .. } => io_exit_code(source),
        SyncError::Io(source) => io_exit_code(source),
        SyncError::Core(_) => EXIT_INVALID_INPUT,
    }
}

fn io_exit_code(err: &io::Error) -> u8 {
    match err.kind() {
        io::ErrorKind::NotFound => EXIT_NOT_FOUND,
        io::ErrorKind::InvalidData => EXIT_INVALID_INPUT,
        _ => EXIT_FAILURE,
    }
}
