use std::path::PathBuf;

use bookshelf_core::{Article, Book, Chapter, SiteConfig, SiteLayout, Slug};
use bookshelf_renderer::{
    context::{ArticleContext, BookContext, ChapterContext, IndexContext, SiteChrome},
    PageKind, RenderError, TemplateCache,
};
use tempfile::TempDir;

fn shipped_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("tmpl")
}

fn make_book() -> Book {
    Book {
        slug: Slug::from("go"),
        title: "Essential Go".to_string(),
        summary: Some("Go & friends".to_string()),
        chapters: vec![Chapter {
            slug: Slug::from("maps"),
            title: "Maps".to_string(),
            body: Some("<p>Maps are hash tables.</p>".to_string()),
            articles: vec![
                Article {
                    slug: Slug::from("create"),
                    title: "Create a map".to_string(),
                    body: "<pre>m := map[string]int{}</pre>".to_string(),
                },
                Article {
                    slug: Slug::from("iterate-keys"),
                    title: "Iterate over keys".to_string(),
                    body: "<pre>for k := range m {}</pre>".to_string(),
                },
            ],
            images: vec![],
        }],
    }
}

fn chrome() -> SiteChrome {
    SiteChrome::from_config(&SiteConfig {
        analytics: "<script>track()</script>".to_string(),
        ..SiteConfig::default()
    })
}

#[test]
fn every_shipped_template_parses() {
    let cache = TemplateCache::new(shipped_templates());
    assert_eq!(cache.preload_all().expect("preload"), PageKind::all().len());
}

#[test]
fn article_page_emits_body_and_analytics_unescaped() {
    let cache = TemplateCache::new(shipped_templates());
    let layout = SiteLayout::new("/www", "https://example.com");
    let chrome = chrome();
    let book = make_book();
    let ctx = ArticleContext::new(&layout, &book, &book.chapters[0], 1, 1, &chrome);

    let html = cache
        .get(PageKind::Article)
        .unwrap()
        .unwrap()
        .render(&ctx)
        .expect("render");
    assert!(html.contains("<pre>for k := range m {}</pre>"));
    assert!(html.contains("<script>track()</script>"));
    assert!(html.contains("rel=\"prev\""), "second article links back");
    assert!(!html.contains("rel=\"next\""), "last article has no next link");
}

#[test]
fn book_page_escapes_plain_text_fields() {
    let cache = TemplateCache::new(shipped_templates());
    let layout = SiteLayout::new("/www", "https://example.com");
    let chrome = chrome();
    let book = make_book();
    let ctx = BookContext::new(&layout, &book, &chrome);

    let html = cache
        .get(PageKind::BookIndex)
        .unwrap()
        .unwrap()
        .render(&ctx)
        .expect("render");
    assert!(html.contains("Go &amp; friends"));
    assert!(html.contains("1. Maps"));
}

#[test]
fn chapter_and_index_pages_render() {
    let cache = TemplateCache::new(shipped_templates());
    let layout = SiteLayout::new("/www", "https://example.com");
    let chrome = chrome();
    let books = vec![make_book()];

    let chapter = ChapterContext::new(&layout, &books[0], &books[0].chapters[0], 1, &chrome);
    let html = cache.get(PageKind::Chapter).unwrap().unwrap().render(&chapter).unwrap();
    assert!(html.contains("Iterate over keys"));
    assert!(html.contains("<p>Maps are hash tables.</p>"));

    let index = IndexContext::new(&layout, &books, &chrome);
    for kind in [PageKind::Index, PageKind::IndexGrid] {
        let html = cache.get(kind).unwrap().unwrap().render(&index).unwrap();
        assert!(html.contains("Essential Go"), "{kind} must list the book");
    }
}

#[test]
fn missing_field_fails_execution() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("about.tmpl.html"), "{{ author.name }}").unwrap();
    let cache = TemplateCache::new(dir.path());
    let err = cache
        .get(PageKind::About)
        .unwrap()
        .unwrap()
        .render(&chrome())
        .unwrap_err();
    assert!(matches!(err, RenderError::Execute { .. }), "got: {err}");
}
