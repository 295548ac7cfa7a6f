use crate::epub::util::{epub2, epub3};
use pagebound::epub::VALUE_SEPARATOR;

#[test]
fn test_epub3_metadata() {
    let epub = epub3().open();
    let metadata = epub.metadata();

    assert_eq!(Some("Pagebound Sample"), metadata.title());
    assert_eq!(Some("en"), metadata.language());
    assert_eq!(Some("2025-01-01T00:00:00Z"), metadata.first("modified"));
    // Refinements are not top-level fields
    assert!(!metadata.contains("role"));
    assert!(metadata.get("publisher").is_none());
}

#[test]
fn test_repeated_fields_keep_every_value() {
    let epub = epub3().open();
    let metadata = epub.metadata();

    assert_eq!(
        vec!["Ada Writer".to_owned(), "Bo Illustrator".to_owned()],
        metadata.creators(),
    );
    assert_eq!(
        Some(format!("Ada Writer{VALUE_SEPARATOR}Bo Illustrator")),
        metadata.get("creator").map(|value| value.into_owned()),
    );
    // A single value is returned as-is
    assert_eq!(Some("en"), metadata.get("language").as_deref());
}

#[test]
fn test_package_attributes() {
    let epub = epub3().open();
    let book = epub.book();

    assert_eq!("OEBPS/content.opf", book.package_file());
    assert_eq!(Some("3.0"), book.version());
    assert_eq!(
        Some("urn:uuid:00000000-0000-4000-8000-000000000000"),
        book.unique_identifier(),
    );
    assert_eq!(None, book.cover_id());
    assert!(book.warnings().is_empty());
}

#[test]
fn test_epub2_metadata() {
    let epub = epub2().open();
    let book = epub.book();

    assert_eq!("content.opf", book.package_file());
    assert_eq!(Some("2.0"), book.version());
    assert_eq!(Some("9780000000000"), book.unique_identifier());
    assert_eq!(Some("cover-art"), book.cover_id());
    assert_eq!(Some("Legacy"), epub.metadata().title());
    assert_eq!(Some("Old Author"), epub.metadata().get("creator").as_deref());
    // EPUB 2 `meta` elements are flattened as well
    assert_eq!(Some("cover-art"), epub.metadata().first("cover"));
}

#[test]
fn test_metadata_iteration() {
    let epub = epub3().open();
    let mut fields: Vec<_> = epub
        .metadata()
        .iter()
        .map(|(field, values)| (field, values.len()))
        .collect();
    fields.sort();

    assert_eq!(
        vec![
            ("creator", 2),
            ("identifier", 1),
            ("language", 1),
            ("modified", 1),
            ("title", 1),
        ],
        fields,
    );
    assert_eq!(5, epub.metadata().len());
}
