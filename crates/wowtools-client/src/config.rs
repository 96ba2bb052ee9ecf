//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/wowtools/config.toml` by default.
//!
//! The calendar feed `token` may reference the environment or the `pass`
//! store, see [`FeedToken`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wowtools_core::UrlTemplate;
use wowtools_providers::{ArmoryConfig, FetchConfig, Region, WowheroesConfig};

use crate::token::FeedToken;

/// Configuration for the wowtools client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Armory settings.
    pub armory: ArmorySettings,

    /// wow-heroes.com settings.
    pub wowheroes: WowheroesSettings,

    /// Defaults for the `calendar` command.
    pub calendar: CalendarSettings,
}

/// Armory settings.
///
/// Templates left unset fall back to the defaults of `region`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorySettings {
    pub region: Region,
    pub character_url: Option<String>,
    pub guild_roster_url: Option<String>,
    pub calendar_url: Option<String>,
    pub user_agent: String,
    /// Connect timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ArmorySettings {
    fn default() -> Self {
        Self {
            region: Region::default(),
            character_url: None,
            guild_roster_url: None,
            calendar_url: None,
            user_agent: FetchConfig::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: FetchConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// wow-heroes.com settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WowheroesSettings {
    pub guild_roster_url: Option<String>,
}

/// Calendar feed defaults, overridable from the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub realm: Option<String>,
    pub character: Option<String>,
    pub token: Option<FeedToken>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wowtools")
    }

    /// Connection settings shared by all sources.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new()
            .with_timeout(Duration::from_secs(self.armory.timeout_secs))
            .with_user_agent(&self.armory.user_agent)
    }

    pub fn armory_config(&self) -> ArmoryConfig {
        let settings = &self.armory;
        let mut config = ArmoryConfig::for_region(settings.region).with_fetch(self.fetch_config());
        if let Some(ref url) = settings.character_url {
            config = config.with_character_url(url.as_str());
        }
        if let Some(ref url) = settings.guild_roster_url {
            config = config.with_guild_roster_url(url.as_str());
        }
        if let Some(ref url) = settings.calendar_url {
            config = config.with_calendar_url(url.as_str());
        }
        config
    }

    pub fn wowheroes_config(&self) -> WowheroesConfig {
        let mut config = WowheroesConfig::default().with_fetch(self.fetch_config());
        if let Some(ref url) = self.wowheroes.guild_roster_url {
            config.guild_roster_url = Some(UrlTemplate::new(url.as_str()));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert!(!config.debug);
        assert_eq!(config.armory.region, Region::Eu);
        assert_eq!(config.armory.timeout_secs, 15);
        assert!(config.calendar.token.is_none());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
debug = true

[armory]
region = "us"
timeout_secs = 5
character_url = "http://christiaan.baartse.nl/?name={{name}}&realm={{realm}}"

[wowheroes]
guild_roster_url = "http://xml.wow-heroes.com/xml-guild.php?z=us&r={{realm}}&g={{guild}}"

[calendar]
realm = "outland"
character = "crushzilla"
token = "s3cr3t"
"#
        )
        .unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.armory.region, Region::Us);
        assert_eq!(config.calendar.realm.as_deref(), Some("outland"));
        assert_eq!(config.calendar.token, Some(FeedToken::Literal("s3cr3t".into())));

        let armory = config.armory_config();
        assert_eq!(armory.fetch.timeout, Duration::from_secs(5));
        assert_eq!(
            armory.character_url.unwrap().as_str(),
            "http://christiaan.baartse.nl/?name={name}&realm={realm}"
        );
        assert_eq!(
            armory.guild_roster_url.unwrap().as_str(),
            "http://www.wowarmory.com/guild-info.xml?r={realm}&n={guild}"
        );

        let wowheroes = config.wowheroes_config();
        assert!(wowheroes.guild_roster_url.unwrap().as_str().contains("z=us"));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.starts_with("failed to read config"));
    }

    #[test]
    fn load_from_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[armory]\nregion = \"kr\"").unwrap();
        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(err.starts_with("failed to parse config"));
    }

    #[test]
    fn default_path_ends_with_wowtools() {
        let path = ClientConfig::default_path();
        assert!(path.ends_with("wowtools/config.toml"));
    }

    #[test]
    fn token_reference_parsed_on_load() {
        let config: ClientConfig =
            toml::from_str("[calendar]\ntoken = \"pass::wow/feed\"").unwrap();
        assert_eq!(config.calendar.token, Some(FeedToken::Pass("wow/feed".into())));

        let dumped = toml::to_string_pretty(&config).unwrap();
        assert!(dumped.contains("token = \"pass::wow/feed\""));
    }

    #[test]
    fn serializes_to_toml() {
        let toml_str = toml::to_string_pretty(&ClientConfig::default()).unwrap();
        assert!(toml_str.contains("[armory]"));
        assert!(toml_str.contains("region = \"eu\""));
    }
}
