use crate::parser::XmlResult;
use quick_xml::Reader;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::borrow::Cow;

pub(crate) type ByteReader<'a> = Reader<&'a [u8]>;

/// Creates a lenient reader over `data`.
///
/// Mismatched end tags are tolerated as real-world navigation documents
/// are frequently hand-written.
pub(crate) fn reader(data: &[u8]) -> ByteReader<'_> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().check_end_names = false;
    reader
}

pub(crate) trait XmlReader<'a> {
    /// Iterator-like method to read the next [`Event`].
    fn next(&mut self) -> Option<XmlResult<Event<'a>>>;

    /// Retrieve consolidated text for a specified element up to its end tag,
    /// including the text of nested elements.
    fn get_element_text(&mut self, start: &BytesStart) -> XmlResult<String> {
        let mut value = String::new();
        let mut depth = 0_usize;

        while let Some(event) = self.next() {
            match event? {
                Event::Start(el) if el.name() == start.name() => depth += 1,
                Event::End(el) if el.name() == start.name() => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                event => push_text(&mut value, &event),
            }
        }
        Ok(collapse_whitespace(&value))
    }
}

impl<'a> XmlReader<'a> for ByteReader<'a> {
    fn next(&mut self) -> Option<XmlResult<Event<'a>>> {
        match self.read_event() {
            Ok(Event::Eof) => None,
            result => Some(result),
        }
    }
}

/// Name matching shared by start and end tags.
pub(crate) trait XmlName {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool;
}

impl XmlName for BytesStart<'_> {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool {
        self.local_name().as_ref() == local_name.as_ref()
    }
}

impl XmlName for BytesEnd<'_> {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool {
        self.local_name().as_ref() == local_name.as_ref()
    }
}

pub(crate) trait XmlElement {
    /// Value of the attribute whose qualified name is exactly `key`.
    fn get_attribute(&self, key: &str) -> Option<String>;

    /// Value of the first attribute whose *local* name is `local_name`,
    /// regardless of prefix (`epub:type`, `ops:type`, `type`).
    fn get_local_attribute(&self, local_name: &str) -> Option<String>;
}

impl XmlElement for BytesStart<'_> {
    fn get_attribute(&self, key: &str) -> Option<String> {
        self.attributes()
            .filter_map(Result::ok)
            .find(|attribute| attribute.key.as_ref() == key.as_bytes())
            .map(|attribute| attribute_value(&attribute.value))
    }

    fn get_local_attribute(&self, local_name: &str) -> Option<String> {
        self.attributes()
            .filter_map(Result::ok)
            .find(|attribute| attribute.key.local_name().as_ref() == local_name.as_bytes())
            .map(|attribute| attribute_value(&attribute.value))
    }
}

/// Appends the textual content of `event` to `value`.
///
/// Since quick-xml reports entity references as separate events,
/// they are resolved here as well.
pub(crate) fn push_text(value: &mut String, event: &Event) {
    match event {
        Event::Text(text) => value.push_str(&String::from_utf8_lossy(text)),
        Event::CData(cdata) => value.push_str(&String::from_utf8_lossy(cdata)),
        Event::GeneralRef(reference) => {
            let name = String::from_utf8_lossy(reference);
            match resolve_entity(&name) {
                Some(resolved) => value.push(resolved),
                None => {
                    value.push('&');
                    value.push_str(&name);
                    value.push(';');
                }
            }
        }
        _ => {}
    }
}

/// Trims and consolidates all whitespace runs into single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());

    for word in text.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }
    collapsed
}

fn attribute_value(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    let unescaped = quick_xml::escape::unescape(&raw).map(Cow::into_owned);

    unescaped.unwrap_or_else(|_| raw.into_owned())
}

/// Resolves the predefined XML entities, character references and the
/// non-breaking space commonly found in XHTML.
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{A0}'),
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
