use crate::errors::{ErrorKind, UtfError};
use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Possible errors from the ZIP container of an [`Epub`](crate::Epub).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The archive itself is unreadable due to not existing,
    /// unsupported format, a malformed central directory or truncation.
    ///
    /// Path *is* [`None`] when the archive was opened from a reader or buffer.
    #[error("[NotAContainer - `{path:?}`]: {source}")]
    NotAContainer {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },

    /// No entry exists under the requested key.
    #[error("[NotFound - `{key}`]: No such entry within the container")]
    NotFound {
        /// The requested container key.
        key: String,
    },

    /// The entry exists, although is unable to be read, typically I/O
    /// or a corrupt compressed stream.
    #[error("[CannotRead - `{key}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The container key of the entry.
        key: String,
    },

    /// The entry exists, although its bytes cannot be read as text.
    #[error("[DecodeFailure - `{key}`]: Entry cannot be read as UTF-8")]
    DecodeFailure {
        /// The root cause of the error.
        source: UtfError,
        /// The container key of the entry.
        key: String,
    },
}

impl ArchiveError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAContainer { .. } => ErrorKind::NotAContainer,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::CannotRead { .. } => ErrorKind::Io,
            Self::DecodeFailure { .. } => ErrorKind::DecodeFailure,
        }
    }
}
