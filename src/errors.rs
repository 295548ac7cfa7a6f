//! Error-related types for an [`Epub`](crate::Epub).
//!
//! Failures fall into two groups:
//! - **Fatal**, returned while opening: the container is not a ZIP archive
//!   ([`ArchiveError::NotAContainer`]), the package document cannot be
//!   located ([`FormatError::NoContainerPointer`]), or the package document is
//!   unusable ([`FormatError::MalformedPackage`]).
//! - **Per-request**, returned by content accessors: a path is missing from the
//!   container, the bytes are not text, or a chapter index is out of bounds.
//!   These never affect subsequent requests.
//!
//! [`EbookError::kind`] flattens either group into an [`ErrorKind`].

pub use crate::archive::errors::{ArchiveError, ArchiveResult};
pub use crate::epub::errors::{ContainerError, PackageError};
use std::char::DecodeUtf16Error;
use std::string::FromUtf8Error;

/// Alias for `Result<T, EbookError>`.
pub type EbookResult<T> = Result<T, EbookError>;

/// Unified error type.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EbookError {
    /// Access to the container has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The container does not hold a usable EPUB package.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A chapter was requested by a position outside the spine.
    #[error("Chapter index {index} is out of bounds (chapter count: {len})")]
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// The number of chapters in the spine.
        len: usize,
    },
}

impl EbookError {
    /// The category of this error.
    ///
    /// # Examples
    /// ```
    /// # use pagebound::Epub;
    /// # use pagebound::errors::ErrorKind;
    /// let error = Epub::from_bytes(b"not a zip archive".to_vec()).unwrap_err();
    /// assert_eq!(ErrorKind::NotAContainer, error.kind());
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Archive(error) => error.kind(),
            Self::Format(FormatError::NoContainerPointer(_)) => ErrorKind::NoContainerPointer,
            Self::Format(FormatError::MalformedPackage { .. }) => ErrorKind::MalformedPackage,
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
        }
    }

    /// Returns `true` if the error aborts opening an [`Epub`](crate::Epub)
    /// rather than a single content request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotAContainer | ErrorKind::NoContainerPointer | ErrorKind::MalformedPackage
        )
    }
}

/// Categories of [`EbookError`].
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input is not a readable ZIP container.
    NotAContainer,
    /// `META-INF/container.xml` does not point at a package document.
    NoContainerPointer,
    /// The package document lacks its metadata, manifest or spine,
    /// or is otherwise unusable.
    MalformedPackage,
    /// A requested path does not exist within the container.
    NotFound,
    /// Bytes could not be decoded as text.
    DecodeFailure,
    /// A chapter index lies outside the spine.
    OutOfBounds,
    /// The container entry exists, although reading it failed.
    Io,
}

/// Possible format errors of an EPUB package.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// The package document cannot be located.
    ///
    /// Error Source: `META-INF/container.xml`
    #[error("Unable to locate the package document: {0}")]
    NoContainerPointer(#[from] ContainerError),

    /// The package document is unusable.
    ///
    /// Error Source: `.opf` file
    #[error("Malformed package document `{file}`: {reason}")]
    MalformedPackage {
        /// Container key of the package document.
        file: String,
        /// The root cause.
        #[source]
        reason: PackageError,
    },
}

/// Specific error details regarding `UTF`.
#[derive(thiserror::Error, Debug)]
pub enum UtfError {
    /// Uneven byte count of UTF-16 data.
    #[error("UTF-16 data needs to contain an even amount of bytes (found {0})")]
    UnevenByteCount(usize),

    /// Invalid UTF-8 data.
    #[error(transparent)]
    InvalidUtf8(#[from] FromUtf8Error),

    /// Invalid UTF-16 data.
    #[error(transparent)]
    UndecodableUtf16(#[from] DecodeUtf16Error),
}
