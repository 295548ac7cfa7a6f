use crate::epub::consts::{self, bytes};
use crate::epub::metadata::Metadata;
use crate::epub::parser::EpubParser;
use crate::parser::XmlResult;
use crate::parser::xml::{ByteReader, XmlElement, XmlName, XmlReader};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

// Legacy OPF 1.x grouping elements, descended into transparently.
// Dublin Core names within `dc-metadata` are capitalized (`dc:Title`).
const DC_METADATA: &[u8] = b"dc-metadata";
const X_METADATA: &[u8] = b"x-metadata";

#[derive(Default)]
pub(super) struct ParsedMetadata {
    pub(super) metadata: Metadata,
    /// Element `id` -> text, used to resolve the package's unique identifier
    pub(super) element_ids: HashMap<String, String>,
    pub(super) cover_id: Option<String>,
}

impl EpubParser<'_> {
    pub(super) fn parse_metadata(reader: &mut ByteReader) -> XmlResult<ParsedMetadata> {
        let mut parsed = ParsedMetadata::default();
        let mut legacy = false;

        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) if el.is_local_name(DC_METADATA) => legacy = true,
                Event::End(el) if el.is_local_name(DC_METADATA) => legacy = false,
                Event::Start(el) if el.is_local_name(X_METADATA) => {}
                Event::Start(el) => {
                    let text = reader.get_element_text(&el)?;

                    if el.is_local_name(bytes::META) {
                        parsed.handle_meta(&el, Some(text));
                    } else {
                        parsed.handle_element(&el, text, legacy);
                    }
                }
                Event::Empty(el) if el.is_local_name(bytes::META) => parsed.handle_meta(&el, None),
                Event::End(el) if el.is_local_name(bytes::METADATA) => break,
                _ => {}
            }
        }
        Ok(parsed)
    }
}

impl ParsedMetadata {
    /// Dublin Core (and any other) elements are keyed by their local name,
    /// lowercased for `legacy` OPF 1.x elements.
    fn handle_element(&mut self, el: &BytesStart, text: String, legacy: bool) {
        if let Some(id) = el.get_attribute(consts::ID) {
            self.element_ids.insert(id, text.clone());
        }
        let name = String::from_utf8_lossy(el.local_name().as_ref()).into_owned();
        let key = if legacy { name.to_lowercase() } else { name };

        self.insert(&key, text);
    }

    /// Flattens `meta` elements:
    /// - EPUB 2: `<meta name="key" content="value"/>`
    /// - EPUB 3: `<meta property="prefix:key">value</meta>`
    ///
    /// Refinements of other elements are ignored.
    fn handle_meta(&mut self, el: &BytesStart, text: Option<String>) {
        if el.get_attribute(consts::REFINES).is_some() {
            return;
        }

        if let Some(name) = el.get_attribute(consts::NAME) {
            let content = el.get_attribute(consts::CONTENT).unwrap_or_default();
            let content = content.trim();

            if name.trim() == consts::COVER && !content.is_empty() {
                self.cover_id.get_or_insert_with(|| content.to_owned());
            }
            self.insert(unprefixed(&name), content.to_owned());
        } else if let Some(property) = el.get_attribute(consts::PROPERTY) {
            self.insert(unprefixed(&property), text.unwrap_or_default());
        }
    }

    fn insert(&mut self, key: &str, value: String) {
        if !key.is_empty() && !value.is_empty() {
            self.metadata.insert(key, value);
        }
    }
}

/// `dcterms:modified` -> `modified`
fn unprefixed(name: &str) -> &str {
    let name = name.trim();
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
