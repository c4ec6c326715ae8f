mod common;

use common::{gallery_html, init_logging};
use covers_engine::{GalleryLinkExtractor, ParseError};
use pretty_assertions::assert_eq;

fn extract(html: &str) -> Vec<String> {
    GalleryLinkExtractor::new().unwrap().extract(html)
}

#[test]
fn gallery_hrefs_are_collected_in_page_order_with_duplicates() {
    let html = gallery_html(&[
        "/sites/default/files/styles/medium/public/covers/jan24.jpg",
        "https://gameinformer.com/sites/default/files/covers/feb24.jpg",
        "/sites/default/files/styles/medium/public/covers/jan24.jpg",
    ]);

    assert_eq!(
        extract(&html),
        vec![
            "/sites/default/files/styles/medium/public/covers/jan24.jpg".to_string(),
            "https://gameinformer.com/sites/default/files/covers/feb24.jpg".to_string(),
            "/sites/default/files/styles/medium/public/covers/jan24.jpg".to_string(),
        ]
    );
}

#[test]
fn links_outside_the_container_are_ignored() {
    let html = r#"
        <a class="gallery" href="/outside.jpg"></a>
        <div class="covers-container">
            <a class="gallery" href="/inside.jpg"></a>
            <a class="other" href="/not-a-gallery-item.jpg"></a>
        </div>"#;

    assert_eq!(extract(html), vec!["/inside.jpg".to_string()]);
}

#[test]
fn missing_container_falls_back_to_whole_document() {
    init_logging();
    let html = r#"<body><a class="gallery" href="/a.jpg"></a><p><a class="gallery" href="/b.jpg"></a></p></body>"#;

    assert_eq!(extract(html), vec!["/a.jpg".to_string(), "/b.jpg".to_string()]);
}

#[test]
fn anchor_without_href_uses_nested_image() {
    let html = r##"<div class="covers-container">
        <a class="gallery"><img src="/covers/src.jpg"></a>
        <a class="gallery" href=" "><img data-src="/covers/lazy.jpg"></a>
        <a class="gallery" href="#"></a>
        <a class="gallery" href="javascript:void(0)"></a>
    </div>"##;

    assert_eq!(
        extract(html),
        vec!["/covers/src.jpg".to_string(), "/covers/lazy.jpg".to_string()]
    );
}

#[test]
fn page_without_links_yields_nothing() {
    init_logging();
    assert!(extract("<html><body><p>No covers today</p></body></html>").is_empty());
    assert!(extract("").is_empty());
}

#[test]
fn bad_selector_is_a_parse_error() {
    let err = GalleryLinkExtractor::with_selectors("div..", "a.gallery").unwrap_err();
    assert!(matches!(err, ParseError::Selector { ref selector, .. } if selector == "div.."));
}
