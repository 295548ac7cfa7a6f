//! Package metadata flattened into a field map.

use std::borrow::Cow;
use std::collections::HashMap;

/// Separator used when several elements share one field name.
pub const VALUE_SEPARATOR: &str = "; ";

/// Metadata of the package document keyed by field name.
///
/// Field names are element local names with any namespace prefix dropped
/// (`dc:title` -> `title`). `<meta>` elements contribute their `name`
/// (EPUB 2) or the local part of their `property` (EPUB 3) as the field name.
///
/// A field may occur several times (e.g. multiple creators).
/// Every occurrence is kept in document order; [`Self::get`] joins them
/// with [`VALUE_SEPARATOR`] while [`Self::values`] exposes them individually.
///
/// # Examples
/// ```
/// # use pagebound::epub::Metadata;
/// let metadata = Metadata::default();
/// assert_eq!(None, metadata.get("creator"));
/// assert!(metadata.values("creator").is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    fields: HashMap<String, Vec<String>>,
}

impl Metadata {
    pub(crate) fn insert(&mut self, field: impl Into<String>, value: String) {
        self.fields.entry(field.into()).or_default().push(value);
    }

    /// Returns the value of `field`, joining repeated occurrences with
    /// [`VALUE_SEPARATOR`], or [`None`] if the field is absent.
    pub fn get(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(field)?.as_slice() {
            [] => None,
            [single] => Some(Cow::Borrowed(single)),
            many => Some(Cow::Owned(many.join(VALUE_SEPARATOR))),
        }
    }

    /// Every occurrence of `field` in document order.
    pub fn values(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// The first occurrence of `field`.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.values(field).first().map(String::as_str)
    }

    /// The first `dc:title`.
    pub fn title(&self) -> Option<&str> {
        self.first("title")
    }

    /// All `dc:creator` entries.
    pub fn creators(&self) -> &[String] {
        self.values("creator")
    }

    /// The first `dc:language`.
    pub fn language(&self) -> Option<&str> {
        self.first("language")
    }

    /// Returns `true` if `field` occurs at least once.
    pub fn contains(&self, field: &str) -> bool {
        !self.values(field).is_empty()
    }

    /// The number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over every field and its values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.fields
            .iter()
            .map(|(field, values)| (field.as_str(), values.as_slice()))
    }
}
