//! Calendar feed tokens.
//!
//! The private feed token can be written into `config.toml` directly or
//! kept outside it:
//!
//! ```toml
//! [calendar]
//! token = "pass::wow/armory-feed"   # first line of `pass show wow/armory-feed`
//! # token = "env::ARMORY_FEED_TOKEN"
//! # token = "a1b2c3"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the feed token comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedToken {
    /// The token itself.
    Literal(String),
    /// An environment variable holding the token.
    Env(String),
    /// An entry in the `pass` password store.
    Pass(String),
}

impl FeedToken {
    const ENV_PREFIX: &'static str = "env::";
    const PASS_PREFIX: &'static str = "pass::";

    /// Looks up the token value.
    ///
    /// # Errors
    ///
    /// Returns a message when the variable is unset, the store entry cannot
    /// be read, or the resulting token is empty.
    pub async fn resolve(&self) -> Result<String, String> {
        let token = match self {
            Self::Literal(token) => token.clone(),
            Self::Env(var) => std::env::var(var)
                .map_err(|_| format!("feed token variable `{}` is not set", var))?,
            Self::Pass(entry) => read_pass_entry(entry).await?,
        };

        let token = token.trim();
        if token.is_empty() {
            return Err(format!("feed token from {} is empty", self));
        }
        Ok(token.to_string())
    }
}

async fn read_pass_entry(entry: &str) -> Result<String, String> {
    debug!(entry = %entry, "Reading feed token from password store");
    let output = tokio::process::Command::new("pass")
        .args(["show", entry])
        .output()
        .await
        .map_err(|e| format!("cannot run pass for `{}`: {}", entry, e))?;

    if !output.status.success() {
        return Err(format!(
            "pass has no entry `{}`: {}",
            entry,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or_default().to_string())
}

impl From<&str> for FeedToken {
    fn from(value: &str) -> Self {
        if let Some(var) = value.strip_prefix(Self::ENV_PREFIX) {
            Self::Env(var.to_string())
        } else if let Some(entry) = value.strip_prefix(Self::PASS_PREFIX) {
            Self::Pass(entry.to_string())
        } else {
            Self::Literal(value.to_string())
        }
    }
}

impl From<String> for FeedToken {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<FeedToken> for String {
    fn from(token: FeedToken) -> Self {
        match token {
            FeedToken::Literal(token) => token,
            FeedToken::Env(var) => format!("{}{}", FeedToken::ENV_PREFIX, var),
            FeedToken::Pass(entry) => format!("{}{}", FeedToken::PASS_PREFIX, entry),
        }
    }
}

/// Never prints a literal token.
impl fmt::Display for FeedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(_) => f.write_str("literal token"),
            Self::Env(var) => write!(f, "${}", var),
            Self::Pass(entry) => write!(f, "pass entry {}", entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_references() {
        assert_eq!(FeedToken::from("a1b2c3"), FeedToken::Literal("a1b2c3".into()));
        assert_eq!(
            FeedToken::from("env::ARMORY_FEED_TOKEN"),
            FeedToken::Env("ARMORY_FEED_TOKEN".into())
        );
        assert_eq!(
            FeedToken::from("pass::wow/armory-feed"),
            FeedToken::Pass("wow/armory-feed".into())
        );
    }

    #[test]
    fn deserializes_from_config_string() {
        #[derive(Deserialize)]
        struct Section {
            token: FeedToken,
        }
        let section: Section = toml::from_str(r#"token = "env::FEED""#).unwrap();
        assert_eq!(section.token, FeedToken::Env("FEED".into()));
    }

    #[test]
    fn serializes_back_to_reference() {
        assert_eq!(String::from(FeedToken::Pass("wow/feed".into())), "pass::wow/feed");
    }

    #[test]
    fn display_hides_literal() {
        let token = FeedToken::Literal("s3cr3t".into());
        assert!(!token.to_string().contains("s3cr3t"));
    }

    #[tokio::test]
    async fn literal_is_trimmed() {
        let token = FeedToken::Literal("  a1b2c3 ".into());
        assert_eq!(token.resolve().await.unwrap(), "a1b2c3");
    }

    #[tokio::test]
    async fn env_reference_resolves() {
        unsafe {
            std::env::set_var("_WOWTOOLS_FEED_TOKEN", "from-env");
        }
        let token = FeedToken::from("env::_WOWTOOLS_FEED_TOKEN");
        assert_eq!(token.resolve().await.unwrap(), "from-env");
        unsafe {
            std::env::remove_var("_WOWTOOLS_FEED_TOKEN");
        }
    }

    #[tokio::test]
    async fn unset_env_reference_errors() {
        let token = FeedToken::from("env::_WOWTOOLS_UNSET_FEED_TOKEN_9876");
        assert!(token.resolve().await.unwrap_err().contains("not set"));
    }

    #[tokio::test]
    async fn empty_literal_errors() {
        let err = FeedToken::Literal(String::new()).resolve().await.unwrap_err();
        assert!(err.contains("empty"));
    }

    #[tokio::test]
    async fn missing_pass_entry_errors() {
        let token = FeedToken::from("pass::nonexistent/wowtools/feed-9876");
        assert!(token.resolve().await.is_err());
    }
}
