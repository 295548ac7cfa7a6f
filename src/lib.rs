//! # pagebound
//! An EPUB package and navigation resolution engine.
//!
//! Opening an [`Epub`] indexes the ZIP container, locates the package document
//! through `META-INF/container.xml`, parses its metadata, manifest and spine,
//! and resolves a table of contents from whichever navigation source the book
//! provides (EPUB 3 navigation document, EPUB 2 NCX, or the spine itself).
//! Content is then served on demand by chapter index or by href.
//!
//! ## Examples
//! ```no_run
//! use pagebound::Epub;
//!
//! # fn main() -> pagebound::errors::EbookResult<()> {
//! let epub = Epub::open("book.epub")?;
//!
//! // Metadata
//! println!("Title = {:?}", epub.metadata().title());
//! println!("Creators = {:?}", epub.metadata().get("creator"));
//!
//! // Table of contents
//! for (depth, node) in epub.toc().flatten() {
//!     let chapter = node.href().and_then(|href| epub.chapter_index_of(href));
//!     println!("{}{} -> {chapter:?}", "  ".repeat(depth), node.title());
//! }
//!
//! // Content
//! let first_chapter = epub.chapter_text(0);
//! let cover = epub.cover_image_bytes();
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//! - `threadsafe` (default): [`Epub`] implements `Send + Sync`.

mod archive;
pub mod epub;
pub mod errors;
mod parser;
mod util;

pub use self::{archive::ArchiveEntry, epub::Epub};

/// Href resolution, as applied to every manifest, navigation and resource href.
pub mod uri {
    pub use crate::util::uri::{decode, file_name, normalize, parent, resolve, split_fragment};
}
