use crate::epub::util::{NCX, epub2, epub3, epub3_with_nav, spine_only};
use pagebound::Epub;
use pagebound::epub::{Toc, TocSource};

fn outline(toc: &Toc) -> Vec<(usize, &str, Option<&str>, Option<&str>)> {
    toc.flatten()
        .map(|(depth, node)| (depth, node.title(), node.href(), node.fragment()))
        .collect()
}

fn nested_nav(depth: usize) -> String {
    let mut nav = String::from(r#"<html><body><nav epub:type="toc"><ol>"#);

    for level in 0..depth {
        nav.push_str(&format!(r#"<li><a href="../Text/c1.xhtml#l{level}">Level {level}</a><ol>"#));
    }
    for _ in 0..depth {
        nav.push_str("</ol></li>");
    }
    nav.push_str("</ol></nav></body></html>");
    nav
}

#[test]
fn test_navigation_document_preferred_over_ncx() {
    let epub = epub3().open();
    let toc = epub.toc();

    assert_eq!(TocSource::Navigation, toc.source());
    assert_eq!(Some("Contents"), toc.title());
    // Hrefs are relative to the navigation document, not the package document
    assert_eq!(
        vec![
            (0, "Chapter One", Some("OEBPS/Text/c1.xhtml"), None),
            (0, "Chapter Two", Some("OEBPS/Text/chapter 2.xhtml"), None),
            (1, "Part 1", Some("OEBPS/Text/chapter 2.xhtml"), Some("part-1")),
            (0, "Appendix", Some("OEBPS/Text/c3.xhtml"), None),
        ],
        outline(toc),
    );
}

#[test]
fn test_toc_hrefs_map_to_chapters() {
    let epub = epub3().open();
    let chapters: Vec<_> = epub
        .toc()
        .flatten()
        .map(|(_, node)| node.href().and_then(|href| epub.chapter_index_of(href)))
        .collect();

    assert_eq!(vec![Some(0), Some(1), Some(1), Some(2)], chapters);
    assert_eq!(None, epub.chapter_index_of("OEBPS/Styles/style.css"));
}

#[test]
fn test_empty_navigation_falls_through_to_ncx() {
    let nav = r#"<html><body><nav epub:type="toc"><h1>Contents</h1><ol/></nav></body></html>"#;
    let epub = epub3_with_nav(nav).open();
    let toc = epub.toc();

    assert_eq!(TocSource::Ncx, toc.source());
    assert_eq!(Some("Pagebound Sample"), toc.title());
    assert_eq!(
        vec![
            (0, "NCX Chapter One", Some("OEBPS/Text/c1.xhtml"), None),
            (0, "NCX Chapter Two", Some("OEBPS/Text/chapter 2.xhtml"), None),
        ],
        outline(toc),
    );
}

#[test]
fn test_unparsable_navigation_falls_through_to_ncx() {
    let nav = r#"<html><body><nav epub:type="toc"><ol><li><a href="../Text/c1.xhtml">One</a></li><li><a href="../Text/c2.xhtml""#;
    let epub = epub3_with_nav(nav).open();

    assert_eq!(TocSource::Ncx, epub.toc().source());
}

#[test]
fn test_ncx_only() {
    let epub = epub2().open();
    let toc = epub.toc();

    assert_eq!(TocSource::Ncx, toc.source());
    // The NCX sits at the container root alongside the package document
    assert_eq!(
        vec![Some("Text/c1.xhtml"), Some("Text/chapter 2.xhtml")],
        toc.nodes().iter().map(|node| node.href()).collect::<Vec<_>>(),
    );
    assert_eq!(Some(1), epub.chapter_index_of(toc.nodes()[1].href().unwrap()));
}

#[test]
fn test_ncx_found_by_media_type() {
    let manifest = r#"
        <item id="c1" href="Text/c1.xhtml" media-type="application/xhtml+xml"/>
        <item id="c2" href="Text/chapter%202.xhtml" media-type="application/xhtml+xml"/>
        <item id="contents" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    "#;
    let spines = [
        r#"<spine><itemref idref="c1"/><itemref idref="c2"/></spine>"#,
        r#"<spine toc="missing"><itemref idref="c1"/><itemref idref="c2"/></spine>"#,
    ];

    for spine in spines {
        let epub = spine_only(manifest, spine).file("OEBPS/toc.ncx", NCX).open();
        let toc = epub.toc();

        assert_eq!(TocSource::Ncx, toc.source(), "{spine}");
        assert_eq!(
            vec![
                (0, "NCX Chapter One", Some("OEBPS/Text/c1.xhtml"), None),
                (0, "NCX Chapter Two", Some("OEBPS/Text/chapter 2.xhtml"), None),
            ],
            outline(toc),
        );
    }
}

#[test]
fn test_spine_fallback() {
    let manifest = r#"
        <item id="c3" href="Text/c3.xhtml" media-type="application/xhtml+xml"/>
        <item id="nav" href="missing/nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
        <item id="c1" href="Text/c1.xhtml" media-type="application/xhtml+xml"/>
        <item id="c2" href="Text/chapter%202.xhtml" media-type="application/xhtml+xml"/>
    "#;
    let spine = r#"<spine><itemref idref="c1"/><itemref idref="c2"/><itemref idref="c3"/></spine>"#;
    let epub = spine_only(manifest, spine).open();
    let toc = epub.toc();

    assert_eq!(TocSource::Spine, toc.source());
    assert_eq!(None, toc.title());
    assert_eq!(epub.chapter_count(), toc.len());
    assert_eq!(
        (0..epub.chapter_count())
            .map(|index| epub.chapter_href(index))
            .collect::<Vec<_>>(),
        toc.nodes().iter().map(|node| node.href()).collect::<Vec<_>>(),
    );
    assert_eq!(
        vec!["c1.xhtml", "chapter 2.xhtml", "c3.xhtml"],
        toc.nodes().iter().map(|node| node.title()).collect::<Vec<_>>(),
    );
    assert!(toc.nodes().iter().all(|node| node.is_leaf()));
}

#[test]
fn test_empty_toc() {
    let manifest = r#"<item id="c1" href="Text/c1.xhtml" media-type="application/xhtml+xml"/>"#;
    let epub = spine_only(manifest, "<spine/>").open();

    assert_eq!(0, epub.chapter_count());
    assert_eq!(TocSource::Empty, epub.toc().source());
    assert!(epub.toc().is_empty());
}

#[test]
fn test_nesting_depth_is_bounded() {
    let nav = nested_nav(200);

    let epub = epub3_with_nav(&nav).open();
    let depths: Vec<_> = epub.toc().flatten().map(|(depth, _)| depth).collect();
    assert_eq!(64, depths.len());
    assert_eq!(Some(&63), depths.last());

    let epub = epub3_with_nav(&nav).open_with(Epub::options().max_toc_depth(3));
    let toc = epub.toc();
    assert_eq!(TocSource::Navigation, toc.source());
    assert_eq!(
        vec![
            (0, "Level 0", Some("OEBPS/Text/c1.xhtml"), Some("l0")),
            (1, "Level 1", Some("OEBPS/Text/c1.xhtml"), Some("l1")),
            (2, "Level 2", Some("OEBPS/Text/c1.xhtml"), Some("l2")),
        ],
        outline(toc),
    );
}
