use crate::archive::errors::{ArchiveError, ArchiveResult};
use crate::archive::{self, Archive, ArchiveEntry};
use crate::util::sync::Lock;
use ::zip::CompressionMethod;
use ::zip::ZipArchive as Zip;
use ::zip::result::ZipError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{self, Read, Seek};
use std::path::Path;

/// Upper bound of what is preallocated before inflating an entry.
/// The declared size of an entry is untrusted input.
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

pub(crate) struct ZipArchive<R> {
    zip: Lock<Zip<R>>,
    entries: Vec<ArchiveEntry>,
    /// Exact entry name -> central directory index
    exact: HashMap<String, usize>,
    /// Folded entry name -> central directory index
    folded: HashMap<String, usize>,
}

impl<R: Read + Seek> ZipArchive<R> {
    /// `reader` (and optional `path` for a more descriptive error message).
    ///
    /// Only the central directory is read here; no entry is inflated.
    pub(crate) fn new(reader: R, path: Option<&Path>) -> ArchiveResult<Self> {
        let unreadable = |error: ZipError| ArchiveError::NotAContainer {
            source: io::Error::from(error),
            path: path.map(Path::to_path_buf),
        };
        let mut zip = Zip::new(reader).map_err(unreadable)?;
        let mut entries = Vec::with_capacity(zip.len());
        let mut exact = HashMap::with_capacity(zip.len());
        let mut folded = HashMap::with_capacity(zip.len());

        for index in 0..zip.len() {
            let file = zip.by_index_raw(index).map_err(unreadable)?;
            if file.is_dir() {
                continue;
            }
            let entry = ArchiveEntry {
                name: file.name().to_owned(),
                compressed_size: file.compressed_size(),
                uncompressed_size: file.size(),
                is_compressed: file.compression() != CompressionMethod::Stored,
            };

            exact.entry(entry.name.clone()).or_insert(index);
            match folded.entry(archive::fold_key(&entry.name)) {
                Entry::Vacant(vacant) => {
                    vacant.insert(index);
                }
                Entry::Occupied(occupied) => log::warn!(
                    "Container entry `{}` shadowed by an earlier entry under `{}`",
                    entry.name,
                    occupied.key(),
                ),
            }
            entries.push(entry);
        }

        log::debug!("Indexed {} container entries", entries.len());

        Ok(Self {
            zip: Lock::new(zip),
            entries,
            exact,
            folded,
        })
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.exact
            .get(key)
            .or_else(|| self.folded.get(&archive::fold_key(key)))
            .copied()
    }
}

impl<#[cfg(feature = "threadsafe")] R: Send + Sync, #[cfg(not(feature = "threadsafe"))] R> Archive
    for ZipArchive<R>
where
    R: Read + Seek + 'static,
{
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    fn contains(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    fn read_bytes(&self, key: &str) -> ArchiveResult<Vec<u8>> {
        let cannot_read = |source: io::Error| ArchiveError::CannotRead {
            source,
            key: key.to_owned(),
        };
        let index = self.index_of(key).ok_or_else(|| ArchiveError::NotFound {
            key: key.to_owned(),
        })?;

        log::trace!("Inflating container entry `{key}`");

        let mut zip = self.zip.acquire();
        let mut file = zip
            .by_index(index)
            .map_err(|error| cannot_read(io::Error::from(error)))?;
        let mut buf = Vec::with_capacity(file.size().min(MAX_PREALLOCATION) as usize);

        file.read_to_end(&mut buf).map(|_| buf).map_err(cannot_read)
    }
}
