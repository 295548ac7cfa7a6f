//! Error-related types for an [`Epub`](super::Epub) package.

use crate::archive::errors::ArchiveError;

/// Reasons `META-INF/container.xml` does not lead to a package document.
///
/// All variants are fatal; they surface as
/// [`FormatError::NoContainerPointer`](crate::errors::FormatError::NoContainerPointer).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ContainerError {
    /// The container holds no `META-INF/container.xml` entry.
    #[error("Missing `META-INF/container.xml`")]
    MissingContainer,

    /// `META-INF/container.xml` exists although cannot be read as text.
    #[error("Unreadable `META-INF/container.xml`: {0}")]
    Unreadable(#[source] ArchiveError),

    /// `META-INF/container.xml` is not well-formed XML.
    #[error("Unparsable `META-INF/container.xml`: {0}")]
    Unparsable(#[from] quick_xml::Error),

    /// No `rootfile` element exists.
    #[error("Missing `rootfile` element referencing the package document")]
    NoRootfile,

    /// The `rootfile` element does not carry a `full-path`.
    #[error("The `rootfile` element is missing its `full-path` attribute")]
    MissingFullPath,
}

/// Reasons a package document is unusable.
///
/// # Variants
/// Variants flagged with `*` only occur when
/// [`EpubOpenOptions::strict`](super::EpubOpenOptions::strict) is enabled;
/// otherwise the offending element is skipped and recorded as a
/// [`ParseWarning`](super::ParseWarning).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum PackageError {
    /// The package document referenced by the container cannot be read.
    #[error("Unreadable package document: {0}")]
    Unreadable(#[source] ArchiveError),

    /// The package document is not well-formed XML.
    #[error(transparent)]
    Unparsable(#[from] quick_xml::Error),

    /// The `metadata` element is not found.
    #[error("Missing `metadata` element")]
    NoMetadataFound,

    /// The `manifest` element is not found.
    #[error("Missing `manifest` element")]
    NoManifestFound,

    /// The `spine` element is not found.
    #[error("Missing `spine` element")]
    NoSpineFound,

    /// Two manifest `item` elements share the same `id`.
    #[error("Duplicate manifest `item` ID found: {0}")]
    DuplicateItemId(String),

    /// `*` A required attribute is missing from an element.
    #[error("Required attribute missing: {0}")]
    MissingAttribute(String),

    /// `*` A spine `itemref` references a non-existent manifest `item`.
    #[error("Spine `itemref` references a non-existent manifest entry by ID: {0}")]
    InvalidIdref(String),
}
