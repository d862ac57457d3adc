mod commands;
mod error;
mod inputs;
mod prompt;
mod render;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{build, completions, contacts, lookup, Context};
use crate::error::{exit_code_for, report_error};
use guestlink_config as config;

#[derive(Debug, Parser)]
#[command(name = "guestlink", version, about = "guestlink CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve the guest list and write the invitation page
    Build(build::BuildArgs),
    /// Show ranked address-book matches for one name
    Match(lookup::MatchArgs),
    /// Normalize phone numbers
    Phone(lookup::PhoneArgs),
    /// List the loaded address book
    Contacts(contacts::ContactsArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let ctx = Context {
        json,
        config: &app_config,
    };

    match command {
        Command::Build(args) => build::build_invitations(&ctx, args),
        Command::Match(args) => lookup::match_name(&ctx, args),
        Command::Phone(args) => lookup::normalize_phones(&ctx, args),
        Command::Contacts(args) => contacts::list_contacts(&ctx, args),
        Command::Completions(_) => unreachable!("completions handled before config load"),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
