use crate::epub::util::{EPUB3_OPF, EpubBuilder, epub3, package};
use pagebound::Epub;
use pagebound::errors::{ArchiveError, EbookError, ErrorKind, FormatError, PackageError};
use std::error::Error;

fn open_error(builder: EpubBuilder) -> EbookError {
    Epub::from_bytes(builder.build()).unwrap_err()
}

#[test]
fn test_not_a_container() {
    for bytes in [Vec::new(), b"PK\x03\x04 definitely not a zip".to_vec()] {
        let error = Epub::from_bytes(bytes).unwrap_err();

        assert_eq!(ErrorKind::NotAContainer, error.kind());
        assert!(error.is_fatal());
    }

    let mut truncated = epub3().build();
    truncated.truncate(truncated.len() / 2);
    assert_eq!(ErrorKind::NotAContainer, Epub::from_bytes(truncated).unwrap_err().kind());
}

#[test]
fn test_missing_file() {
    let error = Epub::open("tests/does/not/exist.epub").unwrap_err();

    assert_eq!(ErrorKind::NotAContainer, error.kind());
    assert!(matches!(
        error,
        EbookError::Archive(ArchiveError::NotAContainer { path: Some(_), .. }),
    ));
}

#[test]
fn test_no_container_pointer() {
    let missing = EpubBuilder::new().file(EPUB3_OPF, "<package/>");
    let no_rootfile = EpubBuilder::new().file(
        "META-INF/container.xml",
        "<container><rootfiles/></container>",
    );
    let unparsable = EpubBuilder::new().file("META-INF/container.xml", "<container><rootfiles");

    for builder in [missing, no_rootfile, unparsable] {
        let error = open_error(builder);

        assert_eq!(ErrorKind::NoContainerPointer, error.kind());
        assert!(matches!(error, EbookError::Format(FormatError::NoContainerPointer(_))));
    }
}

#[test]
fn test_malformed_package() {
    let missing_opf = EpubBuilder::new().container(EPUB3_OPF);
    let no_spine = EpubBuilder::new().container(EPUB3_OPF).file(
        EPUB3_OPF,
        r#"<package version="3.0"><metadata/><manifest/></package>"#,
    );

    let error = open_error(missing_opf);
    assert_eq!(ErrorKind::MalformedPackage, error.kind());
    assert!(matches!(
        &error,
        EbookError::Format(FormatError::MalformedPackage {
            file,
            reason: PackageError::Unreadable(_),
        }) if file == EPUB3_OPF,
    ));

    let error = open_error(no_spine);
    assert_eq!(ErrorKind::MalformedPackage, error.kind());
    assert!(matches!(
        error.source().and_then(|source| source.downcast_ref::<PackageError>()),
        Some(PackageError::NoSpineFound),
    ));
}

#[test]
fn test_package_without_optional_content() {
    // Empty sections are valid; only their absence is fatal
    let epub = EpubBuilder::new()
        .container(EPUB3_OPF)
        .file(EPUB3_OPF, package("3.0", "", "", "<spine/>"))
        .open();

    assert!(epub.metadata().is_empty());
    assert!(epub.manifest().is_empty());
    assert_eq!(0, epub.chapter_count());
    assert!(epub.cover_image_bytes().is_none());
}
