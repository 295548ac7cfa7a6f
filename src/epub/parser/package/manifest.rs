use crate::epub::book::ParseWarning;
use crate::epub::consts::{self, bytes};
use crate::epub::errors::PackageError;
use crate::epub::manifest::{Manifest, ManifestItem};
use crate::epub::parser::EpubParser;
use crate::parser::xml::{ByteReader, XmlElement, XmlName, XmlReader};
use crate::util::uri;
use quick_xml::events::{BytesStart, Event};

impl EpubParser<'_> {
    pub(super) fn parse_manifest(
        &mut self,
        reader: &mut ByteReader,
        package_file: &str,
    ) -> Result<Manifest, PackageError> {
        let mut manifest = Manifest::default();

        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) | Event::Empty(el) if el.is_local_name(bytes::ITEM) => {
                    if let Some(item) = self.parse_manifest_item(&el, package_file)? {
                        manifest
                            .insert(item)
                            .map_err(|item| PackageError::DuplicateItemId(item.id))?;
                    }
                }
                Event::End(el) if el.is_local_name(bytes::MANIFEST) => break,
                _ => {}
            }
        }
        Ok(manifest)
    }

    fn parse_manifest_item(
        &mut self,
        el: &BytesStart,
        package_file: &str,
    ) -> Result<Option<ManifestItem>, PackageError> {
        let id = non_empty(el.get_attribute(consts::ID));
        let href = non_empty(el.get_attribute(consts::HREF));

        let (id, href) = match (id, href) {
            (Some(id), Some(href)) => (id, href),
            (id, href) => {
                let missing = if href.is_some() { consts::ID } else { consts::HREF };
                let error = || PackageError::MissingAttribute(format!("manifest > item[{missing}]"));

                self.recover(ParseWarning::SkippedManifestItem { id, missing }, error)?;
                return Ok(None);
            }
        };

        let media_type = match non_empty(el.get_attribute(consts::MEDIA_TYPE)) {
            Some(media_type) => media_type.to_ascii_lowercase(),
            None if self.config.strict => {
                return Err(PackageError::MissingAttribute(format!(
                    "manifest > item[{}] (id: {id})",
                    consts::MEDIA_TYPE,
                )));
            }
            None => String::new(),
        };

        Ok(Some(ManifestItem {
            // Hrefs are relative to the package document
            href: uri::resolve(package_file, &href),
            id,
            media_type,
            properties: el.get_attribute(consts::PROPERTIES).into(),
        }))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
