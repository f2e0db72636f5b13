//! Typed lookups over parsed XML documents.

use crate::error::{ConvertError, Result};
use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, Node};
use std::str::FromStr;

/// Decode raw entry bytes into text.
///
/// A byte order mark wins, then the `encoding` of the XML declaration.
/// Without either the bytes must be UTF-8.
pub fn decode_document(bytes: &[u8], entry: &str) -> Result<String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => {
            let encoding = match declared_encoding(bytes) {
                Some(label) => {
                    Encoding::for_label(label.as_bytes()).ok_or_else(|| ConvertError::Encoding {
                        entry: entry.to_string(),
                        encoding: label.clone(),
                    })?
                }
                None => UTF_8,
            };
            (encoding, bytes)
        }
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| ConvertError::Encoding {
            entry: entry.to_string(),
            encoding: encoding.name().to_string(),
        })
}

/// `encoding` pseudo-attribute of a leading `<?xml ...?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    if !bytes.starts_with(b"<?xml") {
        return None;
    }
    let end = bytes.windows(2).position(|w| w == b"?>")?;
    let decl = String::from_utf8_lossy(&bytes[..end]);

    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    Some(value[..value.find(quote)?].to_string())
}

/// Parse an XML document, reporting failures against its archive entry.
pub fn parse_document<'a>(text: &'a str, entry: &str) -> Result<Document<'a>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Document::parse(text).map_err(|source| ConvertError::Xml {
        entry: entry.to_string(),
        source,
    })
}

/// Element lookups by local tag name.
pub trait XmlNodeExt<'a, 'input: 'a> {
    /// First direct child element with the given tag.
    fn child(&self, tag: &str) -> Option<Node<'a, 'input>>;

    /// All descendant elements with the given tag, in document order,
    /// including this node itself when it matches.
    fn descendants_by_tag(&self, tag: &str) -> Vec<Node<'a, 'input>>;

    /// Trimmed text of a direct child. `None` if the child is absent or empty.
    fn child_text(&self, tag: &str) -> Option<&'a str>;

    /// Trimmed text of a direct child that must exist.
    /// An existing but empty child yields `""`.
    fn required_text(&self, tag: &str) -> Result<&'a str>;

    /// Parse the text of a direct child that must exist.
    fn required_value<T: FromStr>(&self, tag: &str, expected: &str) -> Result<T>;
}

impl<'a, 'input: 'a> XmlNodeExt<'a, 'input> for Node<'a, 'input> {
    fn child(&self, tag: &str) -> Option<Node<'a, 'input>> {
        self.children()
            .find(|n| n.is_element() && n.tag_name().name() == tag)
    }

    fn descendants_by_tag(&self, tag: &str) -> Vec<Node<'a, 'input>> {
        self.descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == tag)
            .collect()
    }

    fn child_text(&self, tag: &str) -> Option<&'a str> {
        self.child(tag)
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn required_text(&self, tag: &str) -> Result<&'a str> {
        let node = self
            .child(tag)
            .ok_or_else(|| ConvertError::missing(self.tag_name().name(), tag))?;
        Ok(node.text().map(str::trim).unwrap_or(""))
    }

    fn required_value<T: FromStr>(&self, tag: &str, expected: &str) -> Result<T> {
        let text = self.required_text(tag)?;
        text.parse().map_err(|_| ConvertError::InvalidValue {
            field: tag.to_string(),
            expected: expected.to_string(),
            value: text.to_string(),
        })
    }
}
