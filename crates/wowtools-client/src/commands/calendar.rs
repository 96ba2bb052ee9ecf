//! Calendar commands.

use std::path::Path;

use tokio::io::AsyncReadExt;
use tracing::debug;
use wowtools_core::{ParseResult, parse_calendar};
use wowtools_providers::Armory;

use super::print_json;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::token::FeedToken;

/// Feed coordinates after merging command-line values with the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTarget {
    pub realm: String,
    pub character: String,
    pub token: String,
}

impl FeedTarget {
    /// Fills missing values from the `[calendar]` section and resolves the
    /// token.
    pub async fn resolve(
        config: &ClientConfig,
        realm: Option<String>,
        character: Option<String>,
        token: Option<String>,
    ) -> ClientResult<Self> {
        let settings = &config.calendar;
        let realm = realm
            .or_else(|| settings.realm.clone())
            .ok_or_else(|| missing("realm"))?;
        let character = character
            .or_else(|| settings.character.clone())
            .ok_or_else(|| missing("character"))?;
        let token = token
            .map(FeedToken::from)
            .or_else(|| settings.token.clone())
            .ok_or_else(|| missing("token"))?
            .resolve()
            .await
            .map_err(ClientError::Config)?;

        Ok(Self {
            realm,
            character,
            token,
        })
    }
}

fn missing(field: &str) -> ClientError {
    ClientError::Config(format!(
        "no calendar {field} given; pass --{field} or set calendar.{field} in config.toml"
    ))
}

/// Fetches the calendar feed from the armory and prints it as JSON.
pub async fn fetch(config: &ClientConfig, target: &FeedTarget) -> ClientResult<()> {
    let armory = Armory::http(config.armory_config())?;
    let result = armory
        .calendar(&target.realm, &target.character, &target.token)
        .await?;
    print_json(&result)
}

/// Parses a local iCalendar file (`-` for stdin) and prints it as JSON.
pub async fn parse(path: &Path) -> ClientResult<()> {
    let text = read_input(path).await?;
    let result = parse_text(&text)?;
    print_json(&result)
}

pub(crate) fn parse_text(text: &str) -> ClientResult<ParseResult> {
    let result = parse_calendar(text)?;
    debug!(
        meta = result.meta.len(),
        events = result.events.len(),
        "Parsed calendar"
    );
    Ok(result)
}

async fn read_input(path: &Path) -> ClientResult<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(text)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
