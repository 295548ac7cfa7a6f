//! Href algebra shared by every stage that turns a document-relative
//! reference into a container key.
//!
//! A *container key* is the form under which an entry is looked up in the
//! archive: forward slashes, no leading slash, percent-decoded and without
//! a fragment or query (e.g. `OEBPS/Text/chapter 1.xhtml`).

use std::borrow::Cow;

/// Returns the directory portion of `href`, without a trailing slash.
///
/// ```
/// assert_eq!("OEBPS/Text", pagebound::uri::parent("OEBPS/Text/c1.xhtml"));
/// assert_eq!("", pagebound::uri::parent("content.opf"));
/// ```
pub fn parent(href: &str) -> &str {
    href.rfind('/').map_or("", |index| &href[..index])
}

/// Returns the last path segment of `href`.
///
/// ```
/// assert_eq!("c1.xhtml", pagebound::uri::file_name("OEBPS/Text/c1.xhtml"));
/// ```
pub fn file_name(href: &str) -> &str {
    href.rfind('/').map_or(href, |index| &href[index + 1..])
}

/// Percent-decodes `encoded`, replacing invalid UTF-8 sequences.
pub fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Splits `reference` into its path and (raw, still encoded) fragment.
///
/// ```
/// use pagebound::uri::split_fragment;
///
/// assert_eq!(("c2.xhtml", Some("section3")), split_fragment("c2.xhtml#section3"));
/// assert_eq!(("c2.xhtml", None), split_fragment("c2.xhtml"));
/// assert_eq!(("", Some("top")), split_fragment("#top"));
/// ```
pub fn split_fragment(reference: &str) -> (&str, Option<&str>) {
    match reference.find('#') {
        Some(position) => (&reference[..position], Some(&reference[position + 1..])),
        None => (reference, None),
    }
}

/// Resolves `reference` against the *document* `base` into a container key.
///
/// `base` is the key of the document containing the reference
/// (e.g. the package file or a navigation document); its directory is
/// the starting point. A reference beginning with `/` starts from the
/// container root instead. An empty reference (or one made of only a
/// fragment) points back at `base` itself.
///
/// Never fails: `..` above the container root is ignored.
///
/// ```
/// use pagebound::uri::resolve;
///
/// assert_eq!("OEBPS/Images/cover.jpg", resolve("OEBPS/Text/chapter1.xhtml", "../Images/cover.jpg"));
/// assert_eq!("OEBPS/chapter2.xhtml", resolve("OEBPS/content.opf", "chapter2.xhtml#section3"));
/// ```
pub fn resolve(base: &str, reference: &str) -> String {
    let path = strip_query(split_fragment(reference).0);
    let base = base.replace('\\', "/");

    if path.is_empty() {
        let mut segments = Vec::new();
        push_segments(&mut segments, &base);
        return segments.join("/");
    }

    let decoded = decode(path).replace('\\', "/");
    let mut segments = Vec::new();

    if !decoded.starts_with('/') {
        push_segments(&mut segments, parent(&base));
    }
    push_segments(&mut segments, &decoded);
    segments.join("/")
}

/// Canonicalizes a container-relative `path` on its own.
///
/// Equivalent to resolving `path` from the container root.
/// Canonicalizing an already canonical key returns it unchanged,
/// unless the key itself holds a literal `%XX` sequence: `path` is always
/// percent-decoded, so `a%2541.xhtml` becomes `a%41.xhtml` and then `aA.xhtml`.
///
/// ```
/// assert_eq!("OEBPS/content.opf", pagebound::uri::normalize("/OEBPS/./content.opf"));
/// ```
pub fn normalize(path: &str) -> String {
    resolve("", path)
}

/// Returns `true` if `href` carries a URI scheme (`http:`, `mailto:`, …),
/// meaning it points outside the container.
pub(crate) fn has_scheme(href: &str) -> bool {
    let Some(colon) = href.find(':') else {
        return false;
    };
    let scheme = &href[..colon];

    scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn strip_query(path: &str) -> &str {
    path.find('?').map_or(path, |position| &path[..position])
}

fn push_segments<'a>(stack: &mut Vec<&'a str>, path: &'a str) {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                // Climbing above the root is a no-op
                stack.pop();
            }
            _ => stack.push(segment),
        }
    }
}
