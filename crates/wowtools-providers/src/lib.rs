//! Data sources for character, guild and calendar data.
//!
//! - [`Fetcher`] - Retrieves raw response bodies ([`HttpFetcher`] over HTTP)
//! - [`Armory`] - Character sheets, guild rosters and calendar feeds
//! - [`Wowheroes`] - Guild listings from wow-heroes.com
//! - [`XmlDocument`] - Validated XML response
//! - [`ProviderError`] - Error type for all source operations
//!
//! # Architecture
//!
//! ```text
//!   Armory / Wowheroes ──url──▶ Fetcher ──body──┐
//!                                               │
//!            ┌──────────────────────────────────┤
//!            ▼                                  ▼
//!     parse_document()                  parse_calendar()
//!       XmlDocument                       ParseResult
//! ```

pub mod armory;
pub mod error;
pub mod fetch;
pub mod wowheroes;
pub mod xml;

pub use armory::{Armory, ArmoryConfig, Region};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{BoxFuture, FetchConfig, Fetcher};
pub use wowheroes::{Wowheroes, WowheroesConfig};
pub use xml::{XmlDocument, XmlElement, parse_document};
