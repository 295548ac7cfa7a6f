mod container;
mod package;
mod toc;

use crate::archive::Archive;
use crate::epub::EpubConfig;
use crate::epub::book::{Book, ParseWarning};
use crate::epub::errors::PackageError;
use crate::epub::parser::package::PackageData;
use crate::errors::{EbookResult, FormatError};

/// Runs the opening pipeline:
/// `container.xml` -> package document -> table of contents.
///
/// Each stage depends on the output of the previous one.
pub(super) struct EpubParser<'a> {
    config: &'a EpubConfig,
    archive: &'a dyn Archive,
    warnings: Vec<ParseWarning>,
}

impl<'a> EpubParser<'a> {
    pub(super) fn new(config: &'a EpubConfig, archive: &'a dyn Archive) -> Self {
        Self {
            config,
            archive,
            warnings: Vec::new(),
        }
    }

    pub(super) fn parse(mut self) -> EbookResult<Book> {
        // Parse "META-INF/container.xml"
        let package_file = self.locate().map_err(FormatError::from)?;
        log::debug!("Package document located at `{package_file}`");

        // Parse "package.opf"
        let PackageData {
            version,
            unique_identifier,
            metadata,
            manifest,
            spine,
            cover_id,
        } = self
            .parse_package(&package_file)
            .map_err(|reason| FormatError::MalformedPackage {
                file: package_file.clone(),
                reason,
            })?;
        log::debug!(
            "Parsed package: {} manifest items, {} spine entries",
            manifest.len(),
            spine.len(),
        );

        // Parse "toc.xhtml/ncx"
        let toc = self.resolve_toc(&manifest, &spine);

        Ok(Book {
            package_file,
            version,
            unique_identifier,
            metadata,
            manifest,
            spine,
            toc,
            cover_id,
            warnings: self.warnings,
        })
    }

    /// Records a recoverable problem, or raises `error` in strict mode.
    fn recover(
        &mut self,
        warning: ParseWarning,
        error: impl FnOnce() -> PackageError,
    ) -> Result<(), PackageError> {
        if self.config.strict {
            return Err(error());
        }
        log::warn!("{warning}");
        self.warnings.push(warning);
        Ok(())
    }
}
