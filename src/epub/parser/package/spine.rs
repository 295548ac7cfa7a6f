use crate::epub::book::ParseWarning;
use crate::epub::consts::{self, bytes};
use crate::epub::errors::PackageError;
use crate::epub::manifest::Manifest;
use crate::epub::parser::EpubParser;
use crate::epub::spine::{Spine, SpineEntry};
use crate::parser::xml::{ByteReader, XmlElement, XmlName, XmlReader};
use quick_xml::events::{BytesStart, Event};

impl EpubParser<'_> {
    pub(super) fn new_spine(spine: &BytesStart) -> Spine {
        Spine {
            entries: Vec::new(),
            // EPUB 2 reference to the NCX manifest item
            toc: spine
                .get_attribute(consts::TOC)
                .map(|id| id.trim().to_owned())
                .filter(|id| !id.is_empty()),
        }
    }

    pub(super) fn parse_spine(
        &mut self,
        reader: &mut ByteReader,
        spine_el: &BytesStart,
    ) -> Result<Spine, PackageError> {
        let mut spine = Self::new_spine(spine_el);

        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) | Event::Empty(el) if el.is_local_name(bytes::ITEMREF) => {
                    let idref = el.get_attribute(consts::IDREF).unwrap_or_default();
                    let linear = el
                        .get_attribute(consts::LINEAR)
                        .is_none_or(|linear| !linear.trim().eq_ignore_ascii_case("no"));

                    spine.entries.push(SpineEntry {
                        idref: idref.trim().to_owned(),
                        linear,
                    });
                }
                Event::End(el) if el.is_local_name(bytes::SPINE) => break,
                _ => {}
            }
        }
        Ok(spine)
    }

    /// Drops spine entries whose `idref` has no manifest counterpart.
    pub(super) fn retain_known_idrefs(
        &mut self,
        spine: &mut Spine,
        manifest: &Manifest,
    ) -> Result<(), PackageError> {
        let entries = std::mem::take(&mut spine.entries);

        for entry in entries {
            if manifest.by_id(&entry.idref).is_some() {
                spine.entries.push(entry);
                continue;
            }
            let error = || PackageError::InvalidIdref(entry.idref.clone());
            self.recover(
                ParseWarning::SkippedSpineEntry {
                    idref: entry.idref.clone(),
                },
                error,
            )?;
        }
        Ok(())
    }
}
