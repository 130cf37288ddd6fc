use std::{io::IsTerminal, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use git_user::{
    AppError,
    cli::{Cli, Commands},
    commands::execute,
    config::{Settings, resolve_profiles_path},
    git::GitCli,
    menu::InquirePicker,
    output::render,
    storage::ProfileStore,
};

fn main() -> ExitCode {
    let (settings, command) = Cli::parse().into_parts();
    init_logging(&settings);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_interruption() => {
            debug!("interrupted by user");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".red());
            debug!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, settings: &Settings) -> Result<(), AppError> {
    let mut git = GitCli::new(&settings.project_path);
    let profiles_path = resolve_profiles_path(settings.config_file.as_deref(), &git)?;
    let mut store = ProfileStore::load(&profiles_path)?;

    let outcome = execute(command, settings, &mut store, &mut git, &InquirePicker)?;
    println!("{}", render(&outcome)?);
    Ok(())
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(settings.debug)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    debug!("verbose mode activated");
}
