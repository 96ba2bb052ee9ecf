//! Fetching raw response bodies.
//!
//! The data sources never talk to the network directly; they go through a
//! [`Fetcher`]. [`HttpFetcher`] is the production implementation, tests plug
//! in an in-memory one.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::ProviderResult;

/// A boxed future for async trait methods.
///
/// Boxing keeps [`Fetcher`] object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieves the body of a URL as text.
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failures and error statuses.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<String>>;
}

impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
        (**self).fetch(url)
    }
}

/// Connection settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Time allowed to establish the connection.
    pub timeout: Duration,
    /// User agent string sent with every request.
    pub user_agent: String,
}

impl FetchConfig {
    /// Default connect timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    /// The armory only serves XML to browsers it recognizes.
    pub const DEFAULT_USER_AGENT: &'static str =
        "Mozilla/5.0 (X11; U; Linux i686; en-US; rv:1.8.1.2) Gecko/20070319 Firefox/2.0.0.3";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use reqwest::{Client, StatusCode};
    use tracing::{debug, trace, warn};

    use super::{BoxFuture, FetchConfig, Fetcher};
    use crate::error::{ProviderError, ProviderResult};

    /// [`Fetcher`] backed by `reqwest`.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
        config: FetchConfig,
    }

    impl HttpFetcher {
        /// Creates a fetcher with the given connection settings.
        pub fn new(config: FetchConfig) -> ProviderResult<Self> {
            let client = Client::builder()
                .connect_timeout(config.timeout)
                .user_agent(&config.user_agent)
                .build()
                .map_err(|e| {
                    ProviderError::network(format!("Failed to create HTTP client: {}", e))
                        .with_source(e)
                })?;

            Ok(Self { client, config })
        }

        pub fn config(&self) -> &FetchConfig {
            &self.config
        }

        async fn get(&self, url: &str) -> ProviderResult<String> {
            trace!(url = %url, "Sending request");

            let response = self.client.get(url).send().await.map_err(|e| {
                ProviderError::network(format!("Fetching {} failed: {}", url, e)).with_source(e)
            })?;

            let status = response.status();
            debug!(url = %url, status = %status, "Received response");

            match status {
                s if s.is_success() => response.text().await.map_err(|e| {
                    ProviderError::network(format!("Failed to read response: {}", e))
                        .with_source(e)
                }),
                StatusCode::NOT_FOUND => Err(ProviderError::not_found(format!(
                    "Resource not found: {}",
                    url
                ))),
                StatusCode::TOO_MANY_REQUESTS => {
                    Err(ProviderError::rate_limited("Too many requests to server"))
                }
                s if s.is_server_error() => {
                    Err(ProviderError::server(format!("Server error ({})", s)))
                }
                s => {
                    warn!(status = %s, url = %url, "Unexpected response status");
                    Err(ProviderError::invalid_response(format!(
                        "Unexpected status {}",
                        s
                    )))
                }
            }
        }
    }

    impl Fetcher for HttpFetcher {
        fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
            Box::pin(self.get(url))
        }
    }

}
