//! URL templates for the data sources.
//!
//! Templates use named placeholders such as `{realm}` and `{name}`, so a
//! custom template may reorder them freely:
//!
//! ```
//! use wowtools_core::urls::UrlTemplate;
//!
//! let template = UrlTemplate::new("http://example.com/?name={name}&realm={realm}");
//! let url = template.render(&[("realm", "Outland"), ("name", "Crushzilla")]);
//! assert_eq!(url, "http://example.com/?name=Crushzilla&realm=Outland");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// A URL with `{placeholder}` slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Substitutes each `{key}` with its value.
    ///
    /// Values are inserted as given; encode them first. Placeholders without
    /// a value are left in place.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        values
            .iter()
            .fold(self.0.clone(), |url, (key, value)| {
                url.replace(&format!("{{{key}}}"), value)
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UrlTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

/// Upper-cases the first character of every whitespace-separated word.
///
/// The rest of each word is left as is, so `testRealm` becomes `TestRealm`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

/// Encodes a query value (`application/x-www-form-urlencoded`).
pub fn form_encode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Title-cases then encodes a realm, character or guild name.
pub fn encode_name(s: &str) -> String {
    form_encode(&title_case(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("testRealm"), "TestRealm");
        assert_eq!(title_case("flying hellfish"), "Flying Hellfish");
        assert_eq!(title_case("Christiaan Baartse"), "Christiaan Baartse");
        assert_eq!(title_case("  two  spaces"), "  Two  Spaces");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn form_encoding() {
        assert_eq!(form_encode("Flying Hellfish"), "Flying+Hellfish");
        assert_eq!(form_encode("Lacoön"), "Laco%C3%B6n");
        assert_eq!(form_encode("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn encode_name_title_cases_first() {
        assert_eq!(encode_name("lacoön"), "Laco%C3%B6n");
        assert_eq!(encode_name("ravencrest"), "Ravencrest");
    }

    #[test]
    fn render_reordered_placeholders() {
        let template = UrlTemplate::new("http://example.com/?guild={guild}&realm={realm}");
        assert_eq!(
            template.render(&[("realm", "Ravencrest"), ("guild", "Flying+Hellfish")]),
            "http://example.com/?guild=Flying+Hellfish&realm=Ravencrest"
        );
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let template = UrlTemplate::new("http://example.com/{zone}/{realm}");
        assert_eq!(
            template.render(&[("realm", "Outland")]),
            "http://example.com/{zone}/Outland"
        );
    }
}
