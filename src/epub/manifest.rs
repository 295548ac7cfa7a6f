//! The manifest: every resource of the package addressed by ID.

use crate::archive;
use crate::epub::consts;
use crate::util;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Whitespace-separated tokens of a manifest `properties` attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties(Vec<String>);

impl Properties {
    /// Returns `true` if `property` is present.
    pub fn has_property(&self, property: &str) -> bool {
        self.0.iter().any(|token| token == property)
    }

    pub(crate) fn add_property(&mut self, property: &str) {
        if !self.has_property(property) {
            self.0.push(property.to_owned());
        }
    }

    /// Iterates over the tokens in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Returns `true` if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Option<String>> for Properties {
    fn from(value: Option<String>) -> Self {
        Self(
            value
                .iter()
                .flat_map(|value| value.split_ascii_whitespace())
                .map(str::to_owned)
                .collect(),
        )
    }
}

/// A manifest `item`.
#[derive(Clone, Debug, PartialEq)]
pub struct ManifestItem {
    pub(crate) id: String,
    pub(crate) href: String,
    pub(crate) media_type: String,
    pub(crate) properties: Properties,
}

impl ManifestItem {
    /// The unique ID of the item within the package.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The container key of the resource (e.g. `OEBPS/Text/c1.xhtml`).
    ///
    /// Always canonical: percent-decoded, fragment-free,
    /// forward slashes and no leading slash.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The lowercase media type (e.g. `application/xhtml+xml`).
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The `properties` tokens of the item.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Returns `true` if the media type is an `image/*` type.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with(consts::IMAGE_TYPE_PREFIX)
    }
}

/// The manifest of a package in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    items: Vec<ManifestItem>,
    by_id: HashMap<String, usize>,
    /// Folded href -> position
    by_href: HashMap<String, usize>,
}

impl Manifest {
    /// Adds `item`, handing it back if its ID is already taken.
    pub(crate) fn insert(&mut self, item: ManifestItem) -> Result<(), ManifestItem> {
        let position = self.items.len();

        match self.by_id.entry(item.id.clone()) {
            Entry::Occupied(_) => return Err(item),
            Entry::Vacant(vacant) => vacant.insert(position),
        };
        self.by_href
            .entry(archive::fold_key(&item.href))
            .or_insert(position);
        self.items.push(item);
        Ok(())
    }

    pub(crate) fn by_id_mut(&mut self, id: &str) -> Option<&mut ManifestItem> {
        let position = *self.by_id.get(id)?;
        self.items.get_mut(position)
    }

    /// Returns the item with the given `id`.
    pub fn by_id(&self, id: &str) -> Option<&ManifestItem> {
        self.by_id.get(id).map(|&position| &self.items[position])
    }

    /// Returns the first item whose href matches `href`.
    ///
    /// Matching is case-insensitive and ignores any fragment.
    pub fn by_href(&self, href: &str) -> Option<&ManifestItem> {
        let (href, _) = util::uri::split_fragment(href);
        self.by_href
            .get(&archive::fold_key(href))
            .map(|&position| &self.items[position])
    }

    /// Returns the first item in document order carrying `property`.
    pub fn by_property(&self, property: &str) -> Option<&ManifestItem> {
        self.items
            .iter()
            .find(|item| item.properties.has_property(property))
    }

    /// Iterates over items matching `media_type` (case-insensitive).
    pub fn by_media_type<'a>(
        &'a self,
        media_type: &'a str,
    ) -> impl Iterator<Item = &'a ManifestItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.media_type.eq_ignore_ascii_case(media_type))
    }

    /// Iterates over all `image/*` items.
    pub fn images(&self) -> impl Iterator<Item = &ManifestItem> + '_ {
        self.items.iter().filter(|item| item.is_image())
    }

    /// Iterates over all items in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManifestItem> {
        self.items.iter()
    }

    /// The number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestItem;
    type IntoIter = std::slice::Iter<'a, ManifestItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
