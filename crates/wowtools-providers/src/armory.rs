//! Armory data source.
//!
//! Fetches character sheets, guild rosters (both XML) and the private
//! calendar feed (iCalendar) of a character.
//!
//! # Example
//!
//! ```ignore
//! use wowtools_providers::armory::{Armory, ArmoryConfig};
//!
//! let armory = Armory::http(ArmoryConfig::default())?;
//! let sheet = armory.character("outland", "crushzilla").await?;
//! let calendar = armory.calendar("outland", "crushzilla", "s3cr3t").await?;
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wowtools_core::{ParseResult, UrlTemplate, encode_name, form_encode, parse_calendar};

use crate::error::{ProviderError, ProviderResult};
use crate::fetch::{FetchConfig, Fetcher};
use crate::xml::{XmlDocument, parse_document};

/// Name used in error reports.
const PROVIDER: &str = "armory";

/// Marker element present in every valid armory XML page.
pub const MARKER: &str = "tabInfo";

/// Armory region, selecting the host of the default templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Eu,
    Us,
}

impl Region {
    pub fn host(self) -> &'static str {
        match self {
            Self::Eu => "http://eu.wowarmory.com",
            Self::Us => "http://www.wowarmory.com",
        }
    }
}

/// URL templates and connection settings for the armory.
///
/// Each template is optional; requesting data whose template is unset
/// fails with a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmoryConfig {
    /// Placeholders: `{realm}`, `{name}`.
    pub character_url: Option<UrlTemplate>,
    /// Placeholders: `{realm}`, `{guild}`.
    pub guild_roster_url: Option<UrlTemplate>,
    /// Placeholders: `{realm}`, `{character}`, `{token}`.
    pub calendar_url: Option<UrlTemplate>,
    pub fetch: FetchConfig,
}

impl ArmoryConfig {
    /// Creates a configuration with the default templates of `region`.
    pub fn for_region(region: Region) -> Self {
        let host = region.host();
        Self {
            character_url: Some(UrlTemplate::new(format!(
                "{host}/character-sheet.xml?r={{realm}}&n={{name}}"
            ))),
            guild_roster_url: Some(UrlTemplate::new(format!(
                "{host}/guild-info.xml?r={{realm}}&n={{guild}}"
            ))),
            calendar_url: Some(UrlTemplate::new(format!(
                "{host}/feeds/private/calendar.ics?r={{realm}}&cn={{character}}&token={{token}}"
            ))),
            fetch: FetchConfig::default(),
        }
    }

    /// Creates a configuration without any template.
    pub fn empty() -> Self {
        Self {
            character_url: None,
            guild_roster_url: None,
            calendar_url: None,
            fetch: FetchConfig::default(),
        }
    }

    pub fn with_character_url(mut self, template: impl Into<UrlTemplate>) -> Self {
        self.character_url = Some(template.into());
        self
    }

    pub fn with_guild_roster_url(mut self, template: impl Into<UrlTemplate>) -> Self {
        self.guild_roster_url = Some(template.into());
        self
    }

    pub fn with_calendar_url(mut self, template: impl Into<UrlTemplate>) -> Self {
        self.calendar_url = Some(template.into());
        self
    }

    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Builds the character sheet URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no character template is set.
    pub fn character_url(&self, realm: &str, name: &str) -> ProviderResult<String> {
        let template = require(&self.character_url, "character")?;
        let (realm, name) = (encode_name(realm), encode_name(name));
        Ok(template.render(&[("realm", realm.as_str()), ("name", name.as_str())]))
    }

    /// Builds the guild roster URL.
    pub fn guild_roster_url(&self, realm: &str, guild: &str) -> ProviderResult<String> {
        let template = require(&self.guild_roster_url, "guildroster")?;
        let (realm, guild) = (encode_name(realm), encode_name(guild));
        Ok(template.render(&[("realm", realm.as_str()), ("guild", guild.as_str())]))
    }

    /// Builds the calendar feed URL. The token is encoded but not title-cased.
    pub fn calendar_url(
        &self,
        realm: &str,
        character: &str,
        token: &str,
    ) -> ProviderResult<String> {
        let template = require(&self.calendar_url, "calendar")?;
        let realm = encode_name(realm);
        let character = encode_name(character);
        let token = form_encode(token);
        Ok(template.render(&[
            ("realm", realm.as_str()),
            ("character", character.as_str()),
            ("token", token.as_str()),
        ]))
    }
}

impl Default for ArmoryConfig {
    fn default() -> Self {
        Self::for_region(Region::default())
    }
}

/// Armory client.
pub struct Armory<F> {
    config: ArmoryConfig,
    fetcher: F,
}

#[cfg(feature = "http")]
impl Armory<crate::fetch::HttpFetcher> {
    /// Creates a client that fetches over HTTP using `config.fetch`.
    pub fn http(config: ArmoryConfig) -> ProviderResult<Self> {
        let fetcher = crate::fetch::HttpFetcher::new(config.fetch.clone())
            .map_err(|e| e.with_provider(PROVIDER))?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: Fetcher> Armory<F> {
    pub fn new(config: ArmoryConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &ArmoryConfig {
        &self.config
    }

    /// Fetches a character sheet.
    pub async fn character(&self, realm: &str, name: &str) -> ProviderResult<XmlDocument> {
        let url = self.config.character_url(realm, name)?;
        self.request_xml(&url).await
    }

    /// Fetches a guild roster.
    pub async fn guild_roster(&self, realm: &str, guild: &str) -> ProviderResult<XmlDocument> {
        let url = self.config.guild_roster_url(realm, guild)?;
        self.request_xml(&url).await
    }

    /// Fetches and parses a character's calendar feed.
    pub async fn calendar(
        &self,
        realm: &str,
        character: &str,
        token: &str,
    ) -> ProviderResult<ParseResult> {
        let url = self.config.calendar_url(realm, character, token)?;
        let body = self.request(&url).await?;

        let result = parse_calendar(&body)
            .map_err(|e| ProviderError::from(e).with_provider(PROVIDER))?;
        info!(events = result.events.len(), "Fetched calendar");
        Ok(result)
    }

    async fn request(&self, url: &str) -> ProviderResult<String> {
        debug!(url = %url, "Fetching from the armory");
        self.fetcher
            .fetch(url)
            .await
            .map_err(|e| e.with_provider(PROVIDER))
    }

    async fn request_xml(&self, url: &str) -> ProviderResult<XmlDocument> {
        let body = self.request(url).await?;
        parse_document(&body, MARKER).map_err(|e| e.with_provider(PROVIDER))
    }
}

fn require<'a>(template: &'a Option<UrlTemplate>, kind: &str) -> ProviderResult<&'a UrlTemplate> {
    template.as_ref().ok_or_else(|| {
        ProviderError::configuration(format!("No {} url available", kind)).with_provider(PROVIDER)
    })
}
