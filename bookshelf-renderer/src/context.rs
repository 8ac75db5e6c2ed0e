//! Template bindings: serializable rendering payloads built from the content
//! model.
//!
//! Every page context flattens [`SiteChrome`] into its top level, so templates
//! see `analytics`, `path_main_css` etc. next to the page-specific fields.

use serde::Serialize;

use bookshelf_core::{Article, Book, Chapter, SiteConfig, SiteLayout};

/// Site-wide values shared by every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteChrome {
    /// Raw HTML; templates must emit it with `| safe`.
    pub analytics: String,
    pub path_app_js: String,
    pub path_main_css: String,
    pub github_text: String,
    pub github_url: String,
}

impl SiteChrome {
    pub fn from_config(config: &SiteConfig) -> Self {
        SiteChrome {
            analytics: config.analytics.clone(),
            path_app_js: config.path_app_js.clone(),
            path_main_css: config.path_main_css.clone(),
            github_text: "GitHub".to_string(),
            github_url: config.github_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BookLink {
    pub title: String,
    pub url: String,
    pub chapter_count: usize,
    pub article_count: usize,
}

impl BookLink {
    pub fn new(layout: &SiteLayout, book: &Book) -> Self {
        BookLink {
            title: book.title.clone(),
            url: layout.book_url(book),
            chapter_count: book.chapters.len(),
            article_count: book.article_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChapterLink {
    /// 1-based position in the book.
    pub no: usize,
    pub title: String,
    pub url: String,
    pub article_count: usize,
}

impl ChapterLink {
    pub fn new(layout: &SiteLayout, book: &Book, chapter: &Chapter, no: usize) -> Self {
        ChapterLink {
            no,
            title: chapter.title.clone(),
            url: layout.chapter_url(book, chapter),
            article_count: chapter.articles.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleLink {
    /// 1-based position in the chapter.
    pub no: usize,
    pub title: String,
    pub url: String,
}

impl ArticleLink {
    pub fn new(
        layout: &SiteLayout,
        book: &Book,
        chapter: &Chapter,
        article: &Article,
        no: usize,
    ) -> Self {
        ArticleLink {
            no,
            title: article.title.clone(),
            url: layout.article_url(book, chapter, article),
        }
    }
}

// ---------------------------------------------------------------------------
// Page contexts
// ---------------------------------------------------------------------------

/// Binding for `index.tmpl.html` and `index-grid.tmpl.html`.
#[derive(Debug, Serialize)]
pub struct IndexContext<'a> {
    pub books: Vec<BookLink>,
    #[serde(flatten)]
    pub chrome: &'a SiteChrome,
}

impl<'a> IndexContext<'a> {
    pub fn new<'b>(
        layout: &SiteLayout,
        books: impl IntoIterator<Item = &'b Book>,
        chrome: &'a SiteChrome,
    ) -> Self {
        IndexContext {
            books: books.into_iter().map(|b| BookLink::new(layout, b)).collect(),
            chrome,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookView {
    pub title: String,
    pub url: String,
    pub summary: Option<String>,
    pub article_count: usize,
    pub chapters: Vec<ChapterLink>,
}

/// Binding for `book_index.tmpl.html`.
#[derive(Debug, Serialize)]
pub struct BookContext<'a> {
    pub book: BookView,
    #[serde(flatten)]
    pub chrome: &'a SiteChrome,
}

impl<'a> BookContext<'a> {
    pub fn new(layout: &SiteLayout, book: &Book, chrome: &'a SiteChrome) -> Self {
        let chapters = book
            .chapters
            .iter()
            .enumerate()
            .map(|(i, c)| ChapterLink::new(layout, book, c, i + 1))
            .collect();
        BookContext {
            book: BookView {
                title: book.title.clone(),
                url: layout.book_url(book),
                summary: book.summary.clone(),
                article_count: book.article_count(),
                chapters,
            },
            chrome,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterView {
    pub no: usize,
    pub title: String,
    pub url: String,
    pub body: Option<String>,
    pub articles: Vec<ArticleLink>,
}

/// Binding for `chapter.tmpl.html`.
#[derive(Debug, Serialize)]
pub struct ChapterContext<'a> {
    pub chapter: ChapterView,
    pub book: BookLink,
    pub current_chapter_no: usize,
    #[serde(flatten)]
    pub chrome: &'a SiteChrome,
}

impl<'a> ChapterContext<'a> {
    pub fn new(
        layout: &SiteLayout,
        book: &Book,
        chapter: &Chapter,
        chapter_no: usize,
        chrome: &'a SiteChrome,
    ) -> Self {
        let articles = chapter
            .articles
            .iter()
            .enumerate()
            .map(|(i, a)| ArticleLink::new(layout, book, chapter, a, i + 1))
            .collect();
        ChapterContext {
            chapter: ChapterView {
                no: chapter_no,
                title: chapter.title.clone(),
                url: layout.chapter_url(book, chapter),
                body: chapter.body.clone(),
                articles,
            },
            book: BookLink::new(layout, book),
            current_chapter_no: chapter_no,
            chrome,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleView {
    pub no: usize,
    pub title: String,
    pub url: String,
    pub body: String,
}

/// Binding for `article.tmpl.html`.
#[derive(Debug, Serialize)]
pub struct ArticleContext<'a> {
    pub article: ArticleView,
    pub chapter: ChapterLink,
    pub book: BookLink,
    pub prev: Option<ArticleLink>,
    pub next: Option<ArticleLink>,
    pub current_chapter_no: usize,
    #[serde(flatten)]
    pub chrome: &'a SiteChrome,
}

impl<'a> ArticleContext<'a> {
    /// `article_idx` is the 0-based index into `chapter.articles`.
    ///
    /// # Panics
    ///
    /// If `article_idx` is out of bounds.
    pub fn new(
        layout: &SiteLayout,
        book: &Book,
        chapter: &Chapter,
        article_idx: usize,
        chapter_no: usize,
        chrome: &'a SiteChrome,
    ) -> Self {
        let article = &chapter.articles[article_idx];
        let link = |idx: usize| {
            chapter
                .articles
                .get(idx)
                .map(|a| ArticleLink::new(layout, book, chapter, a, idx + 1))
        };
        ArticleContext {
            article: ArticleView {
                no: article_idx + 1,
                title: article.title.clone(),
                url: layout.article_url(book, chapter, article),
                body: article.body.clone(),
            },
            chapter: ChapterLink::new(layout, book, chapter, chapter_no),
            book: BookLink::new(layout, book),
            prev: article_idx.checked_sub(1).and_then(link),
            next: link(article_idx + 1),
            current_chapter_no: chapter_no,
            chrome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::Slug;

    fn make_book() -> Book {
        let article = |slug: &str| Article {
            slug: Slug::from(slug),
            title: slug.to_string(),
            body: format!("<p>{slug}</p>"),
        };
        Book {
            slug: Slug::from("go"),
            title: "Essential Go".to_string(),
            summary: None,
            chapters: vec![Chapter {
                slug: Slug::from("maps"),
                title: "Maps".to_string(),
                body: None,
                articles: vec![article("create"), article("iterate"), article("delete")],
                images: vec![],
            }],
        }
    }

    #[test]
    fn chrome_is_flattened_into_page() {
        let layout = SiteLayout::new("/www", "https://example.com");
        let chrome = SiteChrome::from_config(&SiteConfig::default());
        let books = vec![make_book()];
        let ctx = IndexContext::new(&layout, &books, &chrome);
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["path_main_css"], "/s/main.css");
        assert_eq!(value["github_text"], "GitHub");
        assert_eq!(value["books"][0]["article_count"], 3);
        assert_eq!(value["books"][0]["url"], "https://example.com/essential/go/");
    }

    #[test]
    fn article_context_links_neighbours() {
        let layout = SiteLayout::new("/www", "https://example.com");
        let chrome = SiteChrome::from_config(&SiteConfig::default());
        let book = make_book();
        let chapter = &book.chapters[0];

        let first = ArticleContext::new(&layout, &book, chapter, 0, 1, &chrome);
        assert!(first.prev.is_none());
        assert_eq!(first.next.as_ref().unwrap().title, "iterate");

        let middle = ArticleContext::new(&layout, &book, chapter, 1, 1, &chrome);
        assert_eq!(middle.prev.as_ref().unwrap().no, 1);
        assert_eq!(middle.next.as_ref().unwrap().no, 3);
        assert_eq!(middle.article.url, "https://example.com/essential/go/maps/iterate");

        let last = ArticleContext::new(&layout, &book, chapter, 2, 1, &chrome);
        assert!(last.next.is_none());
    }

    #[test]
    fn chapter_context_carries_position() {
        let layout = SiteLayout::new("/www", "https://example.com");
        let chrome = SiteChrome::from_config(&SiteConfig::default());
        let book = make_book();
        let ctx = ChapterContext::new(&layout, &book, &book.chapters[0], 4, &chrome);
        assert_eq!(ctx.current_chapter_no, 4);
        assert_eq!(ctx.chapter.no, 4);
        assert_eq!(ctx.chapter.articles.len(), 3);
    }
}
