//! wow-heroes.com guild roster source.

use tracing::debug;
use wowtools_core::{UrlTemplate, encode_name};

use crate::error::{ProviderError, ProviderResult};
use crate::fetch::{FetchConfig, Fetcher};
use crate::xml::{XmlDocument, parse_document};

const PROVIDER: &str = "wowheroes";

/// Marker element of a valid guild listing.
pub const MARKER: &str = "guild";

/// URL template and connection settings for wow-heroes.com.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WowheroesConfig {
    /// Placeholders: `{realm}`, `{guild}`. Use `z=us` for US realms.
    pub guild_roster_url: Option<UrlTemplate>,
    pub fetch: FetchConfig,
}

impl WowheroesConfig {
    pub const DEFAULT_GUILD_ROSTER_URL: &'static str =
        "http://xml.wow-heroes.com/xml-guild.php?z=eu&r={realm}&g={guild}";

    pub fn with_guild_roster_url(mut self, template: impl Into<UrlTemplate>) -> Self {
        self.guild_roster_url = Some(template.into());
        self
    }

    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Builds the guild listing URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no template is set.
    pub fn guild_roster_url(&self, realm: &str, guild: &str) -> ProviderResult<String> {
        let template = self.guild_roster_url.as_ref().ok_or_else(|| {
            ProviderError::configuration("No guildroster url available").with_provider(PROVIDER)
        })?;
        let (realm, guild) = (encode_name(realm), encode_name(guild));
        Ok(template.render(&[("realm", realm.as_str()), ("guild", guild.as_str())]))
    }
}

impl Default for WowheroesConfig {
    fn default() -> Self {
        Self {
            guild_roster_url: Some(UrlTemplate::new(Self::DEFAULT_GUILD_ROSTER_URL)),
            fetch: FetchConfig::default(),
        }
    }
}

/// wow-heroes.com client.
pub struct Wowheroes<F> {
    config: WowheroesConfig,
    fetcher: F,
}

#[cfg(feature = "http")]
impl Wowheroes<crate::fetch::HttpFetcher> {
    /// Creates a client that fetches over HTTP using `config.fetch`.
    pub fn http(config: WowheroesConfig) -> ProviderResult<Self> {
        let fetcher = crate::fetch::HttpFetcher::new(config.fetch.clone())
            .map_err(|e| e.with_provider(PROVIDER))?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: Fetcher> Wowheroes<F> {
    pub fn new(config: WowheroesConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Fetches a guild listing.
    pub async fn guild(&self, realm: &str, guild: &str) -> ProviderResult<XmlDocument> {
        let url = self.config.guild_roster_url(realm, guild)?;
        debug!(url = %url, "Fetching from wow-heroes");

        let body = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| e.with_provider(PROVIDER))?;
        parse_document(&body, MARKER).map_err(|e| e.with_provider(PROVIDER))
    }
}
