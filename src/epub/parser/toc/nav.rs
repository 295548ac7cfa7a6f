use crate::epub::consts::{self, bytes};
use crate::epub::parser::toc::TocParser;
use crate::epub::toc::{Toc, TocNode, TocSource};
use crate::parser::XmlResult;
use crate::parser::xml::{self, XmlElement, XmlName, XmlReader};
use crate::util::str::has_token;
use quick_xml::events::{BytesStart, Event};

impl TocParser<'_> {
    /// Parses an XHTML navigation document.
    ///
    /// A document may hold several `nav` elements (`toc`, `landmarks`, `page-list`).
    /// The one typed `toc` is preferred; otherwise the first one is taken.
    pub(super) fn parse_navigation(mut self) -> XmlResult<Toc> {
        let mut first_nav: Option<(Option<String>, Vec<TocNode>)> = None;
        // `Some(is_toc)` while within a `nav` element
        let mut nav: Option<bool> = None;

        while let Some(event) = self.reader.next() {
            let event = event?;

            let Some(is_toc) = nav else {
                if let Event::Start(el) = &event
                    && el.is_local_name(bytes::NAV)
                {
                    nav = Some(
                        el.get_local_attribute(consts::TYPE)
                            .is_some_and(|types| has_token(&types, consts::TOC_TYPE)),
                    );
                }
                continue;
            };

            match event {
                Event::End(el) if el.is_local_name(bytes::NAV) => {
                    nav = None;
                    let nodes = self.take_roots();
                    let title = self.title.take();

                    if is_toc {
                        return Ok(self.complete(title, nodes));
                    }
                    first_nav.get_or_insert((title, nodes));
                }
                Event::Start(el) => self.handle_start(&el)?,
                Event::End(el) if el.is_local_name(bytes::LIST_ITEM) => self.pop_node(),
                Event::Empty(el) if el.is_local_name(bytes::ANCHOR) => {
                    if self.current().is_some_and(|node| node.href.is_none())
                        && let Some(href) = el.get_attribute(consts::HREF)
                    {
                        self.set_target(&href);
                    }
                }
                event => {
                    if let Some(node) = self.current()
                        && node.href.is_none()
                        && node.children.is_empty()
                    {
                        xml::push_text(&mut node.title, &event);
                    }
                }
            }
        }

        // An unterminated `nav` at the end of the document
        if let Some(is_toc) = nav {
            let nodes = self.take_roots();
            let title = self.title.take();

            if is_toc || first_nav.is_none() {
                return Ok(self.complete(title, nodes));
            }
        }
        let (title, nodes) = first_nav.unwrap_or_default();
        Ok(self.complete(title, nodes))
    }

    fn complete(mut self, title: Option<String>, nodes: Vec<TocNode>) -> Toc {
        self.title = title;
        self.roots = nodes;
        self.finish(TocSource::Navigation)
    }

    fn handle_start(&mut self, el: &BytesStart) -> XmlResult<()> {
        match el.local_name().as_ref() {
            bytes::LIST_ITEM => self.push_node(),
            bytes::ANCHOR => {
                let href = el.get_attribute(consts::HREF);
                let label = self.reader.get_element_text(el)?;

                // Only the first link of an entry labels it
                let Some(node) = self.current().filter(|node| node.href.is_none()) else {
                    return Ok(());
                };
                node.title = label;

                if let Some(href) = href {
                    self.set_target(&href);
                }
            }
            name if name == bytes::SPAN || bytes::HEADINGS.contains(&name) => {
                let label = self.reader.get_element_text(el)?;

                if self.stack.is_empty() && self.overflow == 0 {
                    // A heading before the list titles the whole document
                    if self.title.is_none() && !label.is_empty() {
                        self.title = Some(label);
                    }
                } else if let Some(node) = self.current()
                    && node.href.is_none()
                    && node.children.is_empty()
                {
                    node.title.push(' ');
                    node.title.push_str(&label);
                }
            }
            _ => {}
        }
        Ok(())
    }
}
