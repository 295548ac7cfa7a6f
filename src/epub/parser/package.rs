mod manifest;
mod metadata;
mod spine;

use crate::epub::consts::{self, bytes};
use crate::epub::errors::PackageError;
use crate::epub::manifest::Manifest;
use crate::epub::metadata::Metadata;
use crate::epub::parser::EpubParser;
use crate::epub::parser::package::metadata::ParsedMetadata;
use crate::epub::spine::Spine;
use crate::parser::xml::{self, XmlElement, XmlReader};
use quick_xml::events::Event;

/// Everything the package document contributes to a [`Book`](crate::epub::Book).
pub(super) struct PackageData {
    pub(super) version: Option<String>,
    pub(super) unique_identifier: Option<String>,
    pub(super) metadata: Metadata,
    pub(super) manifest: Manifest,
    pub(super) spine: Spine,
    pub(super) cover_id: Option<String>,
}

impl EpubParser<'_> {
    pub(super) fn parse_package(&mut self, package_file: &str) -> Result<PackageData, PackageError> {
        let content = self
            .archive
            .read_str(package_file)
            .map_err(PackageError::Unreadable)?;
        let mut reader = xml::reader(content.as_bytes());

        let mut version = None;
        let mut unique_id_ref = None;
        let mut metadata = None;
        let mut manifest = None;
        let mut spine = None;

        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) => match el.local_name().as_ref() {
                    bytes::PACKAGE => {
                        version = el.get_attribute(consts::VERSION);
                        unique_id_ref = el.get_attribute(consts::UNIQUE_ID);
                    }
                    bytes::METADATA => metadata = Some(Self::parse_metadata(&mut reader)?),
                    bytes::MANIFEST => {
                        manifest = Some(self.parse_manifest(&mut reader, package_file)?);
                    }
                    bytes::SPINE => spine = Some(self.parse_spine(&mut reader, &el)?),
                    _ => {}
                },
                // Self-closing sections are present although empty
                Event::Empty(el) => match el.local_name().as_ref() {
                    bytes::METADATA => metadata = Some(ParsedMetadata::default()),
                    bytes::MANIFEST => manifest = Some(Manifest::default()),
                    bytes::SPINE => spine = Some(Self::new_spine(&el)),
                    _ => {}
                },
                _ => {}
            }
        }

        let metadata = metadata.ok_or(PackageError::NoMetadataFound)?;
        let mut manifest = manifest.ok_or(PackageError::NoManifestFound)?;
        let mut spine = spine.ok_or(PackageError::NoSpineFound)?;

        // The manifest may appear after the spine; idrefs are checked once both exist
        self.retain_known_idrefs(&mut spine, &manifest)?;
        Self::promote_cover_image(&mut manifest, metadata.cover_id.as_deref());

        let unique_identifier = Self::unique_identifier(unique_id_ref.as_deref(), &metadata);

        Ok(PackageData {
            version,
            unique_identifier,
            metadata: metadata.metadata,
            manifest,
            spine,
            cover_id: metadata.cover_id,
        })
    }

    /// Resolves `<package unique-identifier="…">` through the ID of
    /// the matching metadata element.
    ///
    /// Falls back to the first `identifier` when the reference dangles.
    fn unique_identifier(id: Option<&str>, metadata: &ParsedMetadata) -> Option<String> {
        id.and_then(|id| metadata.element_ids.get(id.trim()).cloned())
            .or_else(|| metadata.metadata.first("identifier").map(str::to_owned))
    }

    /// EPUB 2 declares the cover through `<meta name="cover" content="id"/>`.
    /// The referenced item is given the EPUB 3 `cover-image` property,
    /// provided it is an image.
    fn promote_cover_image(manifest: &mut Manifest, cover_id: Option<&str>) {
        let Some(item) = cover_id.and_then(|id| manifest.by_id_mut(id)) else {
            return;
        };
        if item.is_image() {
            item.properties.add_property(consts::COVER_IMAGE_PROPERTY);
        } else {
            log::debug!(
                "Cover meta references `{}` which is not an image ({})",
                item.id,
                item.media_type,
            );
        }
    }
}
