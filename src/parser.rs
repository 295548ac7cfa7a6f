pub(crate) mod xml;

/// Alias for results of the underlying XML reader.
pub(crate) type XmlResult<T> = Result<T, quick_xml::Error>;
