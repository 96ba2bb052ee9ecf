//! XML documents served by the data sources.
//!
//! Responses are parsed into a small owned element tree. A response is only
//! accepted if it is well-formed and its root element has a direct child
//! with the source's marker name (`tabInfo` for the armory, `guild` for
//! wowheroes); the armory serves well-formed error pages without it.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{ProviderError, ProviderResult};

/// An element with its attributes, child elements and text content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlElement {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<XmlElement>,
    /// Concatenated text and CDATA directly inside this element.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl XmlElement {
    /// Returns the first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates over the direct children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn from_start(start: &BytesStart<'_>) -> ProviderResult<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut attributes = BTreeMap::new();

        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value().map_err(malformed)?.to_string();
            attributes.insert(key, value);
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }
}

/// A validated response document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlDocument {
    root: XmlElement,
    #[serde(skip)]
    marker: String,
}

impl XmlDocument {
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Returns the marker element the document was validated against.
    pub fn marker(&self) -> &XmlElement {
        // Presence is checked in `parse_document`.
        self.root.child(&self.marker).unwrap_or(&self.root)
    }

    pub fn into_root(self) -> XmlElement {
        self.root
    }
}

fn malformed<E>(err: E) -> ProviderError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ProviderError::invalid_response("Fetched Xml is malformed").with_source(err)
}

/// Parses `xml` and checks that the root has a `marker` child.
///
/// # Errors
///
/// Returns an `InvalidResponse` error if the text is not a single
/// well-formed document, or if the marker element is missing.
pub fn parse_document(xml: &str, marker: &str) -> ProviderResult<XmlDocument> {
    let root = parse_tree(xml)?;

    if root.child(marker).is_none() {
        debug!(root = %root.name, marker = %marker, "Marker element missing");
        return Err(ProviderError::invalid_response("Fetched Xml invalid"));
    }

    Ok(XmlDocument {
        root,
        marker: marker.to_string(),
    })
}

/// Builds the element tree of a document.
fn parse_tree(xml: &str) -> ProviderResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    let mut close = |element: XmlElement, stack: &mut Vec<XmlElement>| -> ProviderResult<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => root = Some(element),
            None => {
                return Err(ProviderError::invalid_response(
                    "Fetched Xml is malformed: multiple root elements",
                ));
            }
        }
        Ok(())
    };

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => stack.push(XmlElement::from_start(&e)?),
            Event::Empty(e) => {
                let element = XmlElement::from_start(&e)?;
                close(element, &mut stack)?;
            }
            Event::End(_) => {
                // The reader has already matched the end name.
                let element = stack.pop().ok_or_else(|| {
                    ProviderError::invalid_response("Fetched Xml is malformed: unexpected end tag")
                })?;
                close(element, &mut stack)?;
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(malformed)?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None => {
                        return Err(ProviderError::invalid_response(
                            "Fetched Xml is malformed: text outside root element",
                        ));
                    }
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            other => trace!(event = ?other, "Skipping XML event"),
        }
    }

    if !stack.is_empty() {
        return Err(ProviderError::invalid_response(
            "Fetched Xml is malformed: unclosed elements",
        ));
    }

    root.ok_or_else(|| ProviderError::invalid_response("Fetched Xml is malformed: no root element"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    fn character_sheet() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<page globalSearch="1" lang="en_us" requestUrl="/character-sheet.xml">
  <tabInfo subTab="profile" tab="character" tabGroup="character"/>
  <characterInfo>
    <character name="Crushzilla" realm="Outland" classId="1" raceId="3" level="80"
               guildName="Mysth &amp; Co"/>
  </characterInfo>
</page>"#
    }

    #[test]
    fn parses_character_sheet() {
        let doc = parse_document(character_sheet(), "tabInfo").unwrap();

        assert_eq!(doc.root().name, "page");
        assert_eq!(doc.marker().attr("tab"), Some("character"));

        let character = doc
            .root()
            .child("characterInfo")
            .and_then(|info| info.child("character"))
            .unwrap();
        assert_eq!(character.attr("name"), Some("Crushzilla"));
        assert_eq!(character.attr("classId"), Some("1"));
        assert_eq!(character.attr("guildName"), Some("Mysth & Co"));
    }

    #[test]
    fn collects_text_content() {
        let xml = "<guildinfo><guild><name>Mysth</name><member>A</member><member>B</member></guild></guildinfo>";
        let doc = parse_document(xml, "guild").unwrap();

        let guild = doc.marker();
        assert_eq!(guild.child("name").map(|n| n.text.as_str()), Some("Mysth"));
        assert_eq!(guild.children_named("member").count(), 2);
    }

    #[test]
    fn missing_marker_is_invalid() {
        let xml = "<page><errorhtml/></page>";
        let err = parse_document(xml, "tabInfo").unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
        assert_eq!(err.message(), "Fetched Xml invalid");
    }

    #[test]
    fn marker_must_be_direct_child() {
        let xml = "<page><wrapper><tabInfo/></wrapper></page>";
        assert!(parse_document(xml, "tabInfo").is_err());
    }

    #[test]
    fn html_page_is_malformed() {
        let html = "<html><body><p>Down for maintenance<br></body></html>";
        let err = parse_document(html, "tabInfo").unwrap_err();
        assert!(err.message().contains("malformed"));
    }

    #[test]
    fn unclosed_document_is_malformed() {
        let err = parse_document("<page><tabInfo/>", "tabInfo").unwrap_err();
        assert!(err.message().contains("malformed"));
    }

    #[test]
    fn empty_or_plain_text_is_malformed() {
        assert!(parse_document("", "tabInfo").is_err());
        assert!(parse_document("Service unavailable", "tabInfo").is_err());
    }

    #[test]
    fn second_root_is_malformed() {
        let err = parse_document("<a><tabInfo/></a><b/>", "tabInfo").unwrap_err();
        assert!(err.message().contains("multiple root"));
    }
}
