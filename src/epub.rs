//! EPUB 2 and 3 packages: the [`Epub`] façade and the data model it exposes.

mod book;
mod consts;
pub mod errors;
mod manifest;
mod metadata;
mod parser;
mod spine;
mod toc;

use crate::archive::zip::ZipArchive;
use crate::archive::{self, Archive, ArchiveEntry};
use crate::epub::parser::EpubParser;
use crate::errors::{EbookError, EbookResult};
use crate::util::str::StrExt;
use crate::util::uri;
use std::fmt::{Debug, Formatter};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

pub use self::{
    book::{Book, ParseWarning},
    manifest::{Manifest, ManifestItem, Properties},
    metadata::{Metadata, VALUE_SEPARATOR},
    spine::{Spine, SpineEntry},
    toc::{Toc, TocIter, TocNode, TocSource},
};

/// The default bound of [`EpubOpenOptions::max_toc_depth`].
pub const DEFAULT_MAX_TOC_DEPTH: usize = 64;

/// An opened EPUB: the indexed container together with its resolved [`Book`].
///
/// Opening performs the whole pipeline up front
/// (`container.xml` -> package document -> table of contents);
/// afterward, content is inflated lazily one entry at a time.
///
/// # Thread Safety
/// With the default `threadsafe` feature, [`Epub`] implements `Send + Sync`.
/// Concurrent content requests share one container reader,
/// serializing only for the duration of a single entry's decompression.
///
/// # Examples
/// ```no_run
/// # use pagebound::Epub;
/// # fn main() -> pagebound::errors::EbookResult<()> {
/// let epub = Epub::open("book.epub")?;
///
/// println!("{:?}", epub.metadata().title());
///
/// for index in 0..epub.chapter_count() {
///     let xhtml = epub.chapter_text(index);
///     println!("{index}: {} bytes", xhtml.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Epub {
    archive: Box<dyn Archive>,
    book: Book,
}

impl Epub {
    /// Opens an [`Epub`] from the file at `path` with default [`EpubOpenOptions`].
    ///
    /// # Errors
    /// - [`ArchiveError`](crate::errors::ArchiveError): The file cannot be opened
    ///   or is not a ZIP container.
    /// - [`FormatError`](crate::errors::FormatError): No usable package document.
    pub fn open(path: impl AsRef<Path>) -> EbookResult<Self> {
        Self::options().open(path)
    }

    /// Opens an [`Epub`] from any implementation of [`Read`] + [`Seek`]
    /// with default [`EpubOpenOptions`].
    ///
    /// See [`Self::open`] for more details.
    pub fn read<
        #[cfg(feature = "threadsafe")] R: 'static + Read + Seek + Send + Sync,
        #[cfg(not(feature = "threadsafe"))] R: 'static + Read + Seek,
    >(
        reader: R,
    ) -> EbookResult<Self> {
        Self::options().read(reader)
    }

    /// Opens an [`Epub`] from an in-memory container with default [`EpubOpenOptions`].
    ///
    /// See [`Self::open`] for more details.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> EbookResult<Self> {
        Self::options().read_bytes(bytes)
    }

    /// Returns [`EpubOpenOptions`] to configure how an [`Epub`] is opened.
    ///
    /// # Examples
    /// ```no_run
    /// # use pagebound::Epub;
    /// # fn main() -> pagebound::errors::EbookResult<()> {
    /// let epub = Epub::options()
    ///     .strict(true)
    ///     .max_toc_depth(8)
    ///     .open("book.epub")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn options() -> EpubOpenOptions {
        EpubOpenOptions::default()
    }

    fn new(config: &EpubConfig, archive: Box<dyn Archive>) -> EbookResult<Self> {
        let book = EpubParser::new(config, archive.as_ref()).parse()?;

        for warning in &book.warnings {
            log::debug!("Opened with warning: {warning}");
        }
        Ok(Self { archive, book })
    }

    /// The resolved package.
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Package metadata (title, creators, language, …).
    pub fn metadata(&self) -> &Metadata {
        &self.book.metadata
    }

    /// Every resource declared by the package.
    pub fn manifest(&self) -> &Manifest {
        &self.book.manifest
    }

    /// The reading order.
    pub fn spine(&self) -> &Spine {
        &self.book.spine
    }

    /// The table of contents; never absent although possibly
    /// [`empty`](TocSource::Empty).
    pub fn toc(&self) -> &Toc {
        &self.book.toc
    }

    /// All file entries of the container in central directory order.
    pub fn entries(&self) -> &[ArchiveEntry] {
        self.archive.entries()
    }

    /// Reads the container entry `name` as-is, bypassing the package.
    ///
    /// Lookup is case-insensitive and tolerates backslashes and a leading slash.
    pub fn read_entry(&self, name: &str) -> EbookResult<Vec<u8>> {
        Ok(self.archive.read_bytes(name)?)
    }

    /// The number of chapters (spine entries).
    pub fn chapter_count(&self) -> usize {
        self.book.spine.len()
    }

    /// The manifest item of the chapter at `index` in reading order.
    pub fn chapter_item(&self, index: usize) -> Option<&ManifestItem> {
        let entry = self.book.spine.get(index)?;
        self.book.manifest.by_id(entry.idref())
    }

    /// The container key of the chapter at `index` in reading order.
    pub fn chapter_href(&self, index: usize) -> Option<&str> {
        self.chapter_item(index).map(ManifestItem::href)
    }

    /// The raw bytes of the chapter at `index`.
    ///
    /// # Errors
    /// - [`EbookError::OutOfBounds`]: `index` is outside the spine.
    /// - [`ArchiveError::NotFound`](crate::errors::ArchiveError::NotFound):
    ///   The manifest references a missing entry.
    pub fn chapter_bytes(&self, index: usize) -> EbookResult<Vec<u8>> {
        let href = self.chapter_href(index).ok_or(EbookError::OutOfBounds {
            index,
            len: self.chapter_count(),
        })?;
        Ok(self.archive.read_bytes(href)?)
    }

    /// The decoded text of the chapter at `index`.
    ///
    /// UTF-8 and BOM-marked UTF-16 are supported.
    ///
    /// # See Also
    /// - [`Self::chapter_text`] for an infallible variant.
    pub fn chapter_str(&self, index: usize) -> EbookResult<String> {
        let href = self.chapter_href(index).ok_or(EbookError::OutOfBounds {
            index,
            len: self.chapter_count(),
        })?;
        Ok(self.archive.read_str(href)?)
    }

    /// The decoded text of the chapter at `index`, or a placeholder
    /// XHTML document describing why it is unavailable.
    ///
    /// Suits renderers that must show *something* for every position.
    pub fn chapter_text(&self, index: usize) -> String {
        self.chapter_str(index).unwrap_or_else(|error| {
            log::warn!("Chapter {index} is unavailable: {error}");
            placeholder_document(index, &error)
        })
    }

    /// Maps `href` (e.g. from a [`TocNode`]) back to its position in the spine.
    ///
    /// Matching ignores case and any fragment.
    pub fn chapter_index_of(&self, href: &str) -> Option<usize> {
        let item = self.book.manifest.by_href(href)?;

        self.book
            .spine
            .iter()
            .position(|entry| entry.idref() == item.id())
    }

    /// Reads the resource `reference` points at, relative to the document `base`.
    ///
    /// `reference` is resolved the same way package and navigation hrefs are
    /// (see [`uri::resolve`](crate::uri::resolve)).
    ///
    /// # Examples
    /// ```no_run
    /// # use pagebound::Epub;
    /// # fn main() -> pagebound::errors::EbookResult<()> {
    /// let epub = Epub::open("book.epub")?;
    /// let chapter = epub.chapter_href(0).unwrap_or_default();
    /// let image = epub.resource_bytes(chapter, "../Images/figure%201.png")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn resource_bytes(&self, base: &str, reference: &str) -> EbookResult<Vec<u8>> {
        let key = uri::resolve(base, reference);
        Ok(self.archive.read_bytes(&key)?)
    }

    /// The decoded text of the resource `reference` points at,
    /// relative to the document `base`.
    pub fn resource_str(&self, base: &str, reference: &str) -> EbookResult<String> {
        let key = uri::resolve(base, reference);
        Ok(self.archive.read_str(&key)?)
    }

    /// The cover image item.
    ///
    /// Candidates are tried in order; the first one present within the container wins:
    /// 1. The item named by `<meta name="cover">`, if it is an image
    /// 2. The item with the `cover-image` property
    /// 3. An image whose ID or href contains `cover`
    /// 4. The first image
    pub fn cover_image(&self) -> Option<&ManifestItem> {
        self.cover_candidates()
            .find(|item| self.archive.contains(item.href()))
    }

    /// The bytes of the cover image; see [`Self::cover_image`] for the candidates.
    pub fn cover_image_bytes(&self) -> Option<Vec<u8>> {
        self.cover_candidates().find_map(|item| {
            self.archive
                .read_bytes(item.href())
                .inspect_err(|error| log::debug!("Cover candidate `{}` unavailable: {error}", item.id()))
                .ok()
        })
    }

    fn cover_candidates(&self) -> impl Iterator<Item = &ManifestItem> + '_ {
        let manifest = &self.book.manifest;
        let explicit = self
            .book
            .cover_id()
            .and_then(|id| manifest.by_id(id))
            .filter(|item| item.is_image());
        let property = manifest.by_property(consts::COVER_IMAGE_PROPERTY);
        let named = manifest.images().filter(|item| {
            item.id().contains_ignore_case(consts::COVER)
                || item.href().contains_ignore_case(consts::COVER)
        });

        explicit
            .into_iter()
            .chain(property)
            .chain(named)
            .chain(manifest.images())
    }
}

impl Debug for Epub {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Epub")
            .field("book", &self.book)
            .field("entries", &self.archive.entries().len())
            .finish_non_exhaustive()
    }
}

fn placeholder_document(index: usize, error: &EbookError) -> String {
    let reason = error.to_string();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Unavailable chapter</title></head>
<body><p>Chapter {index} could not be loaded: {}</p></body>
</html>"#,
        quick_xml::escape::escape(reason.as_str()),
    )
}

#[derive(Clone, Debug)]
pub(crate) struct EpubConfig {
    pub(crate) strict: bool,
    pub(crate) max_toc_depth: usize,
}

impl Default for EpubConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_toc_depth: DEFAULT_MAX_TOC_DEPTH,
        }
    }
}

/// Options to open an [`Epub`] with, see [`Epub::options`].
///
/// The same options may open any number of books.
#[derive(Clone, Debug, Default)]
pub struct EpubOpenOptions(EpubConfig);

impl EpubOpenOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, recoverable package problems
    /// (see [`ParseWarning`]) fail opening instead.
    ///
    /// Default: `false`
    pub fn strict(mut self, strict: bool) -> Self {
        self.0.strict = strict;
        self
    }

    /// The deepest nesting of table of contents nodes kept;
    /// deeper entries are skipped.
    ///
    /// Values below `1` are treated as `1`.
    ///
    /// Default: [`DEFAULT_MAX_TOC_DEPTH`]
    pub fn max_toc_depth(mut self, max_toc_depth: usize) -> Self {
        self.0.max_toc_depth = max_toc_depth.max(1);
        self
    }

    /// Opens the file at `path`; see [`Epub::open`].
    pub fn open(&self, path: impl AsRef<Path>) -> EbookResult<Epub> {
        let path = path.as_ref();
        log::debug!("Opening `{}`", path.display());
        Epub::new(&self.0, archive::open_file(path)?)
    }

    /// Opens from `reader`; see [`Epub::read`].
    pub fn read<
        #[cfg(feature = "threadsafe")] R: 'static + Read + Seek + Send + Sync,
        #[cfg(not(feature = "threadsafe"))] R: 'static + Read + Seek,
    >(
        &self,
        reader: R,
    ) -> EbookResult<Epub> {
        Epub::new(&self.0, Box::new(ZipArchive::new(reader, None)?))
    }

    /// Opens from an in-memory container; see [`Epub::from_bytes`].
    pub fn read_bytes(&self, bytes: impl Into<Vec<u8>>) -> EbookResult<Epub> {
        self.read(Cursor::new(bytes.into()))
    }
}
