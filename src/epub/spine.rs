//! The spine: the linear reading order of a package.

/// An `itemref` of the spine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpineEntry {
    pub(crate) idref: String,
    pub(crate) linear: bool,
}

impl SpineEntry {
    /// The ID of the referenced manifest item.
    pub fn idref(&self) -> &str {
        &self.idref
    }

    /// Returns `false` if the entry is flagged `linear="no"`
    /// (auxiliary content such as footnotes or answer keys).
    pub fn is_linear(&self) -> bool {
        self.linear
    }
}

/// The ordered spine of a package.
///
/// Every entry is guaranteed to reference an existing manifest item;
/// entries with an unknown `idref` are dropped while parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spine {
    pub(crate) entries: Vec<SpineEntry>,
    /// The manifest ID given by the legacy `toc` attribute (EPUB 2 NCX).
    pub(crate) toc: Option<String>,
}

impl Spine {
    /// Returns the entry at `index` in reading order.
    pub fn get(&self, index: usize) -> Option<&SpineEntry> {
        self.entries.get(index)
    }

    /// The manifest ID of the legacy NCX document declared by the
    /// spine's `toc` attribute, if any.
    pub fn toc_id(&self) -> Option<&str> {
        self.toc.as_deref()
    }

    /// Iterates over the entries in reading order.
    pub fn iter(&self) -> std::slice::Iter<'_, SpineEntry> {
        self.entries.iter()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the spine has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Spine {
    type Item = &'a SpineEntry;
    type IntoIter = std::slice::Iter<'a, SpineEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
