//! Character and guild lookups.

use tracing::info;
use wowtools_providers::{Armory, Wowheroes, XmlDocument};

use super::print_json;
use crate::cli::GuildSource;
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Fetches a character sheet and prints its element tree as JSON.
pub async fn character(config: &ClientConfig, realm: &str, name: &str) -> ClientResult<()> {
    let armory = Armory::http(config.armory_config())?;
    let doc = armory.character(realm, name).await?;
    info!(realm = %realm, name = %name, "Fetched character sheet");
    print_document(&doc)
}

/// Fetches a guild roster from `source` and prints it as JSON.
pub async fn guild(
    config: &ClientConfig,
    realm: &str,
    name: &str,
    source: GuildSource,
) -> ClientResult<()> {
    let doc = match source {
        GuildSource::Armory => {
            Armory::http(config.armory_config())?
                .guild_roster(realm, name)
                .await?
        }
        GuildSource::Wowheroes => {
            Wowheroes::http(config.wowheroes_config())?
                .guild(realm, name)
                .await?
        }
    };
    info!(realm = %realm, guild = %name, source = ?source, "Fetched guild roster");
    print_document(&doc)
}

fn print_document(doc: &XmlDocument) -> ClientResult<()> {
    print_json(doc.root())
}
