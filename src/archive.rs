//! The Container Index: a name-addressable view over a ZIP container.

pub(crate) mod errors;
pub(crate) mod zip;

use crate::archive::errors::{ArchiveError, ArchiveResult};
use crate::archive::zip::ZipArchive;
use crate::util;
use crate::util::sync::SendAndSync;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub(crate) trait Archive: SendAndSync {
    /// All file entries of the container, in central directory order.
    fn entries(&self) -> &[ArchiveEntry];

    /// Returns `true` if an entry resolves from `key`.
    fn contains(&self, key: &str) -> bool;

    /// Inflates the single entry resolved from `key`.
    ///
    /// Lookups are case-insensitive and tolerate backslashes and a leading slash.
    fn read_bytes(&self, key: &str) -> ArchiveResult<Vec<u8>>;

    fn read_str(&self, key: &str) -> ArchiveResult<String> {
        util::utf::into_utf8_str(self.read_bytes(key)?).map_err(|source| {
            ArchiveError::DecodeFailure {
                source,
                key: key.to_owned(),
            }
        })
    }
}

/// A file entry within the container.
///
/// Entries are immutable once the container is indexed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    name: String,
    compressed_size: u64,
    uncompressed_size: u64,
    is_compressed: bool,
}

impl ArchiveEntry {
    /// The name of the entry as stored within the container
    /// (e.g. `OEBPS/Text/chapter1.xhtml`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The size of the stored (possibly compressed) data in bytes.
    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    /// The size of the entry once inflated in bytes.
    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    /// Returns `true` if the entry is stored with a compression method.
    pub fn is_compressed(&self) -> bool {
        self.is_compressed
    }
}

/// The case- and separator-insensitive form of an entry name.
///
/// `/OEBPS\Text\Chapter1.XHTML` -> `oebps/text/chapter1.xhtml`
pub(crate) fn fold_key(name: &str) -> String {
    name.replace('\\', "/")
        .trim_start_matches('/')
        .to_lowercase()
}

pub(crate) fn open_file(path: &Path) -> ArchiveResult<Box<dyn Archive>> {
    let file = File::open(path).map_err(|source| ArchiveError::NotAContainer {
        source,
        path: Some(path.to_path_buf()),
    })?;
    Ok(Box::new(ZipArchive::new(BufReader::new(file), Some(path))?))
}
