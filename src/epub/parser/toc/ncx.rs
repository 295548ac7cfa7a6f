use crate::epub::consts::{self, bytes};
use crate::epub::parser::toc::TocParser;
use crate::epub::toc::{Toc, TocSource};
use crate::parser::XmlResult;
use crate::parser::xml::{XmlElement, XmlName, XmlReader};
use quick_xml::events::{BytesStart, Event};

impl TocParser<'_> {
    /// Parses an EPUB 2 NCX document (`navMap` of nested `navPoint`s).
    ///
    /// `pageList` and `navList` are not part of the table of contents.
    pub(super) fn parse_ncx(mut self) -> XmlResult<Toc> {
        let mut in_doc_title = false;
        let mut in_map = false;
        let mut in_label = false;

        while let Some(event) = self.reader.next() {
            match event? {
                Event::Start(el) => match el.local_name().as_ref() {
                    bytes::DOC_TITLE => in_doc_title = true,
                    bytes::NAV_MAP => in_map = true,
                    bytes::NAV_POINT if in_map => self.push_node(),
                    bytes::NAV_LABEL => in_label = true,
                    bytes::TEXT if in_doc_title => {
                        let text = self.reader.get_element_text(&el)?;

                        if self.title.is_none() && !text.is_empty() {
                            self.title = Some(text);
                        }
                    }
                    bytes::TEXT if in_label => {
                        let text = self.reader.get_element_text(&el)?;

                        if let Some(node) = self.current()
                            && node.title.is_empty()
                        {
                            node.title = text;
                        }
                    }
                    bytes::CONTENT if in_map => self.set_content(&el),
                    _ => {}
                },
                Event::Empty(el) if in_map && el.is_local_name(bytes::CONTENT) => {
                    self.set_content(&el);
                }
                Event::End(el) => match el.local_name().as_ref() {
                    bytes::DOC_TITLE => in_doc_title = false,
                    bytes::NAV_LABEL => in_label = false,
                    bytes::NAV_POINT if in_map => self.pop_node(),
                    bytes::NAV_MAP => break,
                    _ => {}
                },
                _ => {}
            }
        }
        Ok(self.finish(TocSource::Ncx))
    }

    fn set_content(&mut self, el: &BytesStart) {
        if self.current().is_some_and(|node| node.href.is_none())
            && let Some(src) = el.get_attribute(consts::SRC)
        {
            self.set_target(&src);
        }
    }
}
