mod nav;
mod ncx;

use crate::archive::errors::ArchiveError;
use crate::epub::consts;
use crate::epub::manifest::{Manifest, ManifestItem};
use crate::epub::parser::EpubParser;
use crate::epub::spine::Spine;
use crate::epub::toc::{Toc, TocNode, TocSource};
use crate::parser::xml::{self, ByteReader};
use crate::util::uri;

/// Reasons a navigation document is passed over.
///
/// Never surfaced; the next strategy is attempted instead.
#[derive(thiserror::Error, Debug)]
enum TocError {
    #[error(transparent)]
    Unreadable(#[from] ArchiveError),
    #[error("Unparsable navigation document: {0}")]
    Unparsable(#[from] quick_xml::Error),
}

impl EpubParser<'_> {
    /// Produces a table of contents, never failing:
    /// 1. The XHTML navigation document (`nav` property)
    /// 2. The NCX document (spine `toc` attribute, or by media type)
    /// 3. One node per spine entry
    pub(super) fn resolve_toc(&self, manifest: &Manifest, spine: &Spine) -> Toc {
        let strategies = [
            (manifest.by_property(consts::NAV_PROPERTY), TocSource::Navigation),
            (Self::find_ncx(manifest, spine), TocSource::Ncx),
        ];

        for (item, source) in strategies {
            let Some(item) = item else { continue };

            match self.parse_toc_document(item, source) {
                Ok(toc) if !toc.is_empty() => {
                    log::debug!("Table of contents resolved from `{}`", item.href());
                    return toc;
                }
                Ok(_) => log::debug!("`{}` holds no table of contents entries", item.href()),
                Err(error) => log::warn!("Skipping navigation document `{}`: {error}", item.href()),
            }
        }

        log::debug!("Synthesizing table of contents from the spine");
        Self::spine_toc(manifest, spine)
    }

    fn find_ncx<'m>(manifest: &'m Manifest, spine: &Spine) -> Option<&'m ManifestItem> {
        spine
            .toc_id()
            .and_then(|id| manifest.by_id(id))
            .or_else(|| manifest.by_media_type(consts::NCX_TYPE).next())
    }

    fn parse_toc_document(&self, item: &ManifestItem, source: TocSource) -> Result<Toc, TocError> {
        let content = self.archive.read_str(item.href())?;
        let parser = TocParser::new(content.as_bytes(), item.href(), self.config.max_toc_depth);

        let toc = match source {
            TocSource::Ncx => parser.parse_ncx()?,
            _ => parser.parse_navigation()?,
        };
        Ok(toc)
    }

    fn spine_toc(manifest: &Manifest, spine: &Spine) -> Toc {
        let nodes: Vec<_> = spine
            .iter()
            .filter_map(|entry| manifest.by_id(entry.idref()))
            .map(|item| TocNode {
                title: uri::file_name(item.href()).to_owned(),
                href: Some(item.href().to_owned()),
                ..TocNode::default()
            })
            .collect();

        if nodes.is_empty() {
            return Toc::empty();
        }
        Toc {
            source: TocSource::Spine,
            title: None,
            nodes,
        }
    }
}

/// Tree-building state shared by the navigation and NCX formats.
struct TocParser<'a> {
    reader: ByteReader<'a>,
    /// Container key of the navigation document; hrefs are relative to it
    location: &'a str,
    max_depth: usize,
    /// Currently open nodes, innermost last
    stack: Vec<TocNode>,
    /// Open elements nested beyond `max_depth`, which are not descended into
    overflow: usize,
    roots: Vec<TocNode>,
    title: Option<String>,
}

impl<'a> TocParser<'a> {
    fn new(data: &'a [u8], location: &'a str, max_depth: usize) -> Self {
        Self {
            reader: xml::reader(data),
            location,
            max_depth,
            stack: Vec::new(),
            overflow: 0,
            roots: Vec::new(),
            title: None,
        }
    }

    fn push_node(&mut self) {
        if self.overflow > 0 || self.stack.len() >= self.max_depth {
            if self.overflow == 0 {
                log::warn!(
                    "`{}` nests deeper than {} levels; skipping deeper entries",
                    self.location,
                    self.max_depth,
                );
            }
            self.overflow += 1;
        } else {
            self.stack.push(TocNode::default());
        }
    }

    fn pop_node(&mut self) {
        if self.overflow > 0 {
            self.overflow -= 1;
            return;
        }
        let Some(mut node) = self.stack.pop() else {
            return;
        };
        node.title = xml::collapse_whitespace(&node.title);

        if node.is_blank() {
            return;
        }
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    /// The innermost open node, unless within a skipped subtree.
    fn current(&mut self) -> Option<&mut TocNode> {
        match self.overflow {
            0 => self.stack.last_mut(),
            _ => None,
        }
    }

    /// Points the current node at `href`, resolved against the document location.
    ///
    /// Links carrying a scheme leave the container; they keep no target.
    fn set_target(&mut self, href: &str) {
        let location = self.location;
        let Some(node) = self.current() else {
            return;
        };
        let href = href.trim();

        if href.is_empty() || uri::has_scheme(href) {
            return;
        }
        let (_, fragment) = uri::split_fragment(href);

        node.href = Some(uri::resolve(location, href));
        node.fragment = fragment
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| uri::decode(fragment).into_owned());
    }

    /// Closes any unterminated nodes and takes the finished tree.
    fn take_roots(&mut self) -> Vec<TocNode> {
        while !self.stack.is_empty() || self.overflow > 0 {
            self.pop_node();
        }
        std::mem::take(&mut self.roots)
    }

    fn finish(mut self, source: TocSource) -> Toc {
        let nodes = self.take_roots();
        Toc {
            source,
            title: self.title,
            nodes,
        }
    }
}
