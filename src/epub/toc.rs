//! The table of contents as a normalized tree.
//!
//! Whichever navigation format a package provides, the result is the
//! same [`Toc`] shape; [`Toc::source`] tells which one was used.

use std::slice::Iter as SliceIter;

/// The strategy that produced a [`Toc`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TocSource {
    /// The EPUB 3 XHTML navigation document (`nav` property).
    Navigation,
    /// The EPUB 2 navigation control document (`.ncx`).
    Ncx,
    /// Synthesized from the spine; one entry per chapter titled by file name.
    Spine,
    /// Nothing to navigate by: no navigation document and an empty spine.
    Empty,
}

/// A node of the table of contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TocNode {
    pub(crate) title: String,
    pub(crate) href: Option<String>,
    pub(crate) fragment: Option<String>,
    pub(crate) children: Vec<TocNode>,
}

impl TocNode {
    /// The human-readable label.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The container key of the target document.
    ///
    /// [`None`] for grouping headings without a link and for
    /// links pointing outside the container.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// The percent-decoded in-document anchor (without `#`), if any.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Nested nodes in document order.
    pub fn children(&self) -> &[TocNode] {
        &self.children
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if the node carries neither label, target nor children.
    pub(crate) fn is_blank(&self) -> bool {
        self.title.is_empty() && self.href.is_none() && self.children.is_empty()
    }
}

/// The table of contents of an [`Epub`](super::Epub).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toc {
    pub(crate) source: TocSource,
    pub(crate) title: Option<String>,
    pub(crate) nodes: Vec<TocNode>,
}

impl Toc {
    pub(crate) fn empty() -> Self {
        Self {
            source: TocSource::Empty,
            title: None,
            nodes: Vec::new(),
        }
    }

    /// The strategy that produced this table of contents.
    pub fn source(&self) -> TocSource {
        self.source
    }

    /// The heading of the navigation document (`nav > h1` or NCX `docTitle`).
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The top-level nodes.
    pub fn nodes(&self) -> &[TocNode] {
        &self.nodes
    }

    /// The number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, pre-order traversal of every node with its depth
    /// (`0` = top level).
    ///
    /// # Examples
    /// ```no_run
    /// # use pagebound::Epub;
    /// # fn main() -> pagebound::errors::EbookResult<()> {
    /// let epub = Epub::open("book.epub")?;
    ///
    /// for (depth, node) in epub.toc().flatten() {
    ///     println!("{}{}", "  ".repeat(depth), node.title());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn flatten(&self) -> TocIter<'_> {
        TocIter {
            stack: vec![self.nodes.iter()],
        }
    }
}

/// Iterator returned by [`Toc::flatten`].
///
/// Uses an explicit stack, so traversal depth is not bounded by the call stack.
#[derive(Clone, Debug)]
pub struct TocIter<'a> {
    stack: Vec<SliceIter<'a, TocNode>>,
}

impl<'a> Iterator for TocIter<'a> {
    type Item = (usize, &'a TocNode);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;

            match self.stack.last_mut()?.next() {
                Some(node) => {
                    self.stack.push(node.children.iter());
                    return Some((depth, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
