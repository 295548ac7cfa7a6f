use crate::archive::errors::ArchiveError;
use crate::epub::consts::{self, bytes};
use crate::epub::errors::ContainerError;
use crate::epub::parser::EpubParser;
use crate::parser::xml::{self, XmlElement, XmlName, XmlReader};
use crate::util::uri;
use quick_xml::events::Event;

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml` and retrieves the package `.opf` file location.
    pub(super) fn locate(&self) -> Result<String, ContainerError> {
        let content = self
            .archive
            .read_str(consts::CONTAINER)
            .map_err(|error| match error {
                ArchiveError::NotFound { .. } => ContainerError::MissingContainer,
                error => ContainerError::Unreadable(error),
            })?;

        parse_container(content.as_bytes())
    }
}

fn parse_container(data: &[u8]) -> Result<String, ContainerError> {
    let mut reader = xml::reader(data);
    let mut has_rootfile = false;
    let mut fallback = None;

    while let Some(event) = reader.next() {
        let el = match event? {
            Event::Start(el) | Event::Empty(el) if el.is_local_name(bytes::ROOT_FILE) => el,
            _ => continue,
        };
        has_rootfile = true;

        let Some(full_path) = el
            .get_attribute(consts::FULL_PATH)
            .filter(|path| !path.trim().is_empty())
        else {
            continue;
        };
        // Although rare, multiple renditions may exist.
        // The first OEBPS package is the default one.
        let is_package = el
            .get_attribute(consts::MEDIA_TYPE)
            .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(consts::PACKAGE_TYPE));

        if is_package {
            return Ok(uri::normalize(full_path.trim()));
        }
        fallback.get_or_insert(full_path);
    }

    match fallback {
        Some(full_path) => Ok(uri::normalize(full_path.trim())),
        None if has_rootfile => Err(ContainerError::MissingFullPath),
        None => Err(ContainerError::NoRootfile),
    }
}
