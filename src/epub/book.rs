use crate::epub::manifest::Manifest;
use crate::epub::metadata::Metadata;
use crate::epub::spine::Spine;
use crate::epub::toc::Toc;
use std::fmt::{Display, Formatter};

/// The resolved package: everything known about a book besides the
/// bytes of its resources.
///
/// Built once while opening an [`Epub`](super::Epub) and never modified afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct Book {
    pub(crate) package_file: String,
    pub(crate) version: Option<String>,
    pub(crate) unique_identifier: Option<String>,
    pub(crate) metadata: Metadata,
    pub(crate) manifest: Manifest,
    pub(crate) spine: Spine,
    pub(crate) toc: Toc,
    pub(crate) cover_id: Option<String>,
    pub(crate) warnings: Vec<ParseWarning>,
}

impl Book {
    /// The container key of the package (`.opf`) document.
    pub fn package_file(&self) -> &str {
        &self.package_file
    }

    /// The raw `version` attribute of the `package` element (e.g. `3.0`).
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The value of the identifier referenced by the package's
    /// `unique-identifier` attribute.
    pub fn unique_identifier(&self) -> Option<&str> {
        self.unique_identifier.as_deref()
    }

    /// Package metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Every resource declared by the package.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The linear reading order.
    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    /// The table of contents.
    pub fn toc(&self) -> &Toc {
        &self.toc
    }

    /// The manifest ID given by `<meta name="cover" content="…"/>`, if any.
    pub fn cover_id(&self) -> Option<&str> {
        self.cover_id.as_deref()
    }

    /// Recoverable problems skipped over while parsing the package.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }
}

/// A recoverable package problem.
///
/// With [`EpubOpenOptions::strict`](super::EpubOpenOptions::strict) enabled,
/// these are raised as [`PackageError`](super::errors::PackageError)s instead.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseWarning {
    /// A manifest `item` lacked a required attribute and was skipped.
    SkippedManifestItem {
        /// The `id` of the item, if it had one.
        id: Option<String>,
        /// The missing attribute.
        missing: &'static str,
    },
    /// A spine `itemref` referenced an unknown manifest ID and was skipped.
    SkippedSpineEntry {
        /// The unknown ID (empty if the `idref` attribute is absent).
        idref: String,
    },
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SkippedManifestItem { id: Some(id), missing } => {
                write!(f, "manifest item `{id}` skipped: missing `{missing}`")
            }
            Self::SkippedManifestItem { id: None, missing } => {
                write!(f, "manifest item skipped: missing `{missing}`")
            }
            Self::SkippedSpineEntry { idref } => {
                write!(f, "spine entry skipped: unknown manifest ID `{idref}`")
            }
        }
    }
}
