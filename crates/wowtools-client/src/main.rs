//! wowtools CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use wowtools_client::cli::{Cli, Command, ConfigAction};
use wowtools_client::commands;
use wowtools_client::config::ClientConfig;
use wowtools_client::error::{ClientError, ClientResult};
use wowtools_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config)?,
        None => ClientConfig::load().map_err(ClientError::Config)?,
    };

    init_tracing(TracingConfig::cli(cli.debug || config.debug))?;
    debug!(command = ?cli.command, "Running command");

    match cli.command {
        Command::Calendar {
            realm,
            character,
            token,
        } => {
            let target =
                commands::calendar::FeedTarget::resolve(&config, realm, character, token).await?;
            commands::calendar::fetch(&config, &target).await
        }
        Command::Parse { file } => commands::calendar::parse(&file).await,
        Command::Character { realm, name } => {
            commands::lookup::character(&config, &realm, &name).await
        }
        Command::Guild {
            realm,
            name,
            source,
        } => commands::lookup::guild(&config, &realm, &name, source).await,
        Command::Url { target } => commands::url::print(&config, &target),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
