use crate::epub::util::{
    CHAPTER_1, CHAPTER_2, COVER_JPG, EpubBuilder, EPUB3_OPF, epub2, epub3, package, spine_only,
};
use pagebound::errors::{EbookError, ErrorKind};
use wasm_bindgen_test::wasm_bindgen_test;

#[test]
#[wasm_bindgen_test]
fn test_chapters() {
    let epub = epub3().open();

    assert_eq!(CHAPTER_1.as_bytes(), epub.chapter_bytes(0).unwrap());
    assert_eq!(CHAPTER_2, epub.chapter_text(1));
    assert_eq!(CHAPTER_2, epub.chapter_str(1).unwrap());
    assert_eq!("c2", epub.chapter_item(1).unwrap().id());
}

#[test]
#[wasm_bindgen_test]
fn test_chapter_out_of_bounds() {
    let epub = epub3().open();

    for index in [3, 4, usize::MAX] {
        let error = epub.chapter_bytes(index).unwrap_err();

        assert!(matches!(error, EbookError::OutOfBounds { index: i, len: 3 } if i == index));
        assert_eq!(ErrorKind::OutOfBounds, error.kind());
        assert!(!error.is_fatal());
    }
    let placeholder = epub.chapter_text(3);
    assert!(placeholder.contains("could not be loaded"), "{placeholder}");
    // Unaffected by prior failures
    assert_eq!(CHAPTER_1, epub.chapter_text(0));
}

#[test]
fn test_missing_chapter_entry() {
    let manifest = r#"
        <item id="c1" href="Text/c1.xhtml" media-type="application/xhtml+xml"/>
        <item id="gone" href="Text/gone.xhtml" media-type="application/xhtml+xml"/>
    "#;
    let spine = r#"<spine><itemref idref="gone"/><itemref idref="c1"/></spine>"#;
    let epub = spine_only(manifest, spine).open();

    assert_eq!(2, epub.chapter_count());
    assert_eq!(ErrorKind::NotFound, epub.chapter_bytes(0).unwrap_err().kind());

    let placeholder = epub.chapter_text(0);
    assert!(placeholder.starts_with("<?xml"));
    assert!(placeholder.contains("Text/gone.xhtml"), "{placeholder}");
    assert_eq!(CHAPTER_1, epub.chapter_text(1));
}

#[test]
fn test_utf16_chapter() {
    let text = "<html><body><p>Ünïcödé</p></body></html>";
    let mut utf16 = vec![0xFF, 0xFE];
    utf16.extend(text.encode_utf16().flat_map(u16::to_le_bytes));

    let manifest = r#"<item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>"#;
    let epub = EpubBuilder::new()
        .container(EPUB3_OPF)
        .file(EPUB3_OPF, package("3.0", "", manifest, r#"<spine><itemref idref="c1"/></spine>"#))
        .file("OEBPS/c1.xhtml", utf16)
        .open();

    assert_eq!(text, epub.chapter_text(0));
}

#[test]
fn test_undecodable_chapter() {
    let manifest = r#"<item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>"#;
    let epub = EpubBuilder::new()
        .container(EPUB3_OPF)
        .file(EPUB3_OPF, package("3.0", "", manifest, r#"<spine><itemref idref="c1"/></spine>"#))
        .file("OEBPS/c1.xhtml", b"\xC3\x28 invalid")
        .open();

    assert_eq!(ErrorKind::DecodeFailure, epub.chapter_str(0).unwrap_err().kind());
    assert_eq!(b"\xC3\x28 invalid".to_vec(), epub.chapter_bytes(0).unwrap());
    assert!(epub.chapter_text(0).contains("could not be loaded"));
}

#[test]
fn test_resource_self_reference_round_trip() {
    for epub in [epub3().open(), epub2().open()] {
        for item in epub.manifest() {
            let direct = epub.read_entry(item.href()).unwrap();

            assert_eq!(direct, epub.resource_bytes(item.href(), "").unwrap());
            assert_eq!(direct, epub.resource_bytes(item.href(), "#anchor").unwrap());
        }
    }
}

#[test]
fn test_relative_resources() {
    let epub = epub3().open();
    let chapter = epub.chapter_href(0).unwrap();

    assert_eq!(COVER_JPG, epub.resource_bytes(chapter, "../Images/cover.jpg").unwrap());
    assert_eq!(COVER_JPG, epub.resource_bytes(chapter, "/OEBPS/Images/cover.jpg").unwrap());
    assert_eq!(CHAPTER_2, epub.resource_str(chapter, "chapter%202.xhtml#part-1").unwrap());
    assert_eq!(
        "p { margin: 0; }",
        epub.resource_str(chapter, "..\\Styles\\style.css").unwrap(),
    );

    let error = epub.resource_bytes(chapter, "../Images/missing.png").unwrap_err();
    assert_eq!(ErrorKind::NotFound, error.kind());
}

#[test]
fn test_entries() {
    let epub = epub3().open();
    let names: Vec<_> = epub.entries().iter().map(|entry| entry.name()).collect();

    assert_eq!(Some(&"mimetype"), names.first());
    assert!(names.contains(&"OEBPS/Text/chapter 2.xhtml"));
    assert_eq!(11, names.len());
    assert_eq!(
        b"application/epub+zip".to_vec(),
        epub.read_entry("MIMETYPE").unwrap(),
    );
    assert_eq!(CHAPTER_1.as_bytes(), epub.read_entry("oebps\\text\\C1.XHTML").unwrap());
}

#[test]
fn test_cover_image_by_property() {
    let epub = epub3().open();

    assert_eq!("cover", epub.cover_image().unwrap().id());
    assert_eq!(Some(COVER_JPG.to_vec()), epub.cover_image_bytes());
}

#[test]
fn test_cover_image_by_meta() {
    let epub = epub2().open();

    assert_eq!("cover-art", epub.cover_image().unwrap().id());
    assert_eq!(Some(COVER_JPG.to_vec()), epub.cover_image_bytes());
}

#[test]
fn test_cover_image_heuristics() {
    let spine = r#"<spine><itemref idref="c1"/></spine>"#;
    let build = |manifest: &str| {
        EpubBuilder::new()
            .container(EPUB3_OPF)
            .file(EPUB3_OPF, package("3.0", "", manifest, spine))
            .file("OEBPS/c1.xhtml", CHAPTER_1)
            .file("OEBPS/img/back.png", b"back")
            .file("OEBPS/img/Front-Cover.png", b"front")
            .open()
    };
    let chapter = r#"<item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>"#;

    // Named after the cover
    let epub = build(&format!(
        r#"{chapter}
        <item id="i1" href="img/back.png" media-type="image/png"/>
        <item id="i2" href="img/Front-Cover.png" media-type="image/png"/>"#
    ));
    assert_eq!(Some(b"front".to_vec()), epub.cover_image_bytes());

    // Any image
    let epub = build(&format!(
        r#"{chapter}<item id="i1" href="img/back.png" media-type="image/png"/>"#
    ));
    assert_eq!("i1", epub.cover_image().unwrap().id());

    // Declared although missing from the container
    let epub = build(&format!(
        r#"{chapter}
        <item id="i0" href="img/missing-cover.png" media-type="image/png" properties="cover-image"/>
        <item id="i1" href="img/back.png" media-type="image/png"/>"#
    ));
    assert_eq!("i1", epub.cover_image().unwrap().id());
    assert_eq!(Some(b"back".to_vec()), epub.cover_image_bytes());

    // No images at all
    let epub = build(chapter);
    assert_eq!(None, epub.cover_image());
    assert_eq!(None, epub.cover_image_bytes());
}
