//! URL printing.

use crate::cli::{GuildSource, UrlTarget};
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Builds the URL a fetch for `target` would request.
pub fn build(config: &ClientConfig, target: &UrlTarget) -> ClientResult<String> {
    let url = match target {
        UrlTarget::Character { realm, name } => {
            config.armory_config().character_url(realm, name)?
        }
        UrlTarget::Guild {
            realm,
            name,
            source: GuildSource::Armory,
        } => config.armory_config().guild_roster_url(realm, name)?,
        UrlTarget::Guild {
            realm,
            name,
            source: GuildSource::Wowheroes,
        } => config.wowheroes_config().guild_roster_url(realm, name)?,
        UrlTarget::Calendar {
            realm,
            character,
            token,
        } => config.armory_config().calendar_url(realm, character, token)?,
    };
    Ok(url)
}

/// Prints the URL for `target`.
pub fn print(config: &ClientConfig, target: &UrlTarget) -> ClientResult<()> {
    println!("{}", build(config, target)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_url() {
        let target = UrlTarget::Character {
            realm: "outland".into(),
            name: "lacoön".into(),
        };
        assert_eq!(
            build(&ClientConfig::default(), &target).unwrap(),
            "http://eu.wowarmory.com/character-sheet.xml?r=Outland&n=Laco%C3%B6n"
        );
    }

    #[test]
    fn wowheroes_guild_url() {
        let target = UrlTarget::Guild {
            realm: "ravencrest".into(),
            name: "flying hellfish".into(),
            source: GuildSource::Wowheroes,
        };
        assert_eq!(
            build(&ClientConfig::default(), &target).unwrap(),
            "http://xml.wow-heroes.com/xml-guild.php?z=eu&r=Ravencrest&g=Flying+Hellfish"
        );
    }

    #[test]
    fn builds_without_http_client() {
        // Not a valid header value, so no HTTP client could be built.
        let mut config = ClientConfig::default();
        config.armory.user_agent = "wowtools\n0.1".into();
        let target = UrlTarget::Guild {
            realm: "outland".into(),
            name: "mysth".into(),
            source: GuildSource::Armory,
        };
        assert_eq!(
            build(&config, &target).unwrap(),
            "http://eu.wowarmory.com/guild-info.xml?r=Outland&n=Mysth"
        );
    }

    #[test]
    fn calendar_url_uses_configured_template() {
        let mut config = ClientConfig::default();
        config.armory.calendar_url =
            Some("http://localhost/cal.ics?c={character}&r={realm}&t={token}".into());
        let target = UrlTarget::Calendar {
            realm: "outland".into(),
            character: "crushzilla".into(),
            token: "abc".into(),
        };
        assert_eq!(
            build(&config, &target).unwrap(),
            "http://localhost/cal.ics?c=Crushzilla&r=Outland&t=abc"
        );
    }
}
