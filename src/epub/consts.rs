// Paths
pub(crate) const CONTAINER: &str = "META-INF/container.xml";

// Container attributes
pub(crate) const FULL_PATH: &str = "full-path";

// General attributes
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const SRC: &str = "src";
pub(crate) const TYPE: &str = "type";

// Package attributes
pub(crate) const VERSION: &str = "version";
pub(crate) const UNIQUE_ID: &str = "unique-identifier";

// Metadata attributes
pub(crate) const NAME: &str = "name";
pub(crate) const CONTENT: &str = "content";
pub(crate) const PROPERTY: &str = "property";
pub(crate) const REFINES: &str = "refines";

// Metadata values
pub(crate) const COVER: &str = "cover";

// Manifest attributes
pub(crate) const MEDIA_TYPE: &str = "media-type";
pub(crate) const PROPERTIES: &str = "properties";

// Manifest item properties
pub(crate) const COVER_IMAGE_PROPERTY: &str = "cover-image";
pub(crate) const NAV_PROPERTY: &str = "nav";

// Spine attributes
pub(crate) const IDREF: &str = "idref";
pub(crate) const LINEAR: &str = "linear";
pub(crate) const TOC: &str = "toc";

// Nav attribute values
pub(crate) const TOC_TYPE: &str = "toc";

// Media types
pub(crate) const PACKAGE_TYPE: &str = "application/oebps-package+xml";
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";
pub(crate) const IMAGE_TYPE_PREFIX: &str = "image/";

// constants where calling str.as_bytes() is not possible
pub(crate) mod bytes {
    pub(crate) const ROOT_FILE: &[u8] = b"rootfile";

    pub(crate) const PACKAGE: &[u8] = b"package";
    pub(crate) const METADATA: &[u8] = b"metadata";
    pub(crate) const MANIFEST: &[u8] = b"manifest";
    pub(crate) const SPINE: &[u8] = b"spine";
    pub(crate) const META: &[u8] = b"meta";
    pub(crate) const ITEM: &[u8] = b"item";
    pub(crate) const ITEMREF: &[u8] = b"itemref";

    // XHTML nav
    pub(crate) const NAV: &[u8] = b"nav";
    pub(crate) const LIST_ITEM: &[u8] = b"li";
    pub(crate) const ANCHOR: &[u8] = b"a";
    pub(crate) const SPAN: &[u8] = b"span";
    pub(crate) const HEADINGS: [&[u8]; 6] = [b"h1", b"h2", b"h3", b"h4", b"h5", b"h6"];

    // NCX
    pub(crate) const DOC_TITLE: &[u8] = b"docTitle";
    pub(crate) const NAV_MAP: &[u8] = b"navMap";
    pub(crate) const NAV_POINT: &[u8] = b"navPoint";
    pub(crate) const NAV_LABEL: &[u8] = b"navLabel";
    pub(crate) const TEXT: &[u8] = b"text";
    pub(crate) const CONTENT: &[u8] = b"content";
}
