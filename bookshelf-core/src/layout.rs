//! Output layout: destination paths and canonical URLs.
//!
//! | Page        | File                                          | URL                                 |
//! |-------------|-----------------------------------------------|-------------------------------------|
//! | Site index  | `<out>/index.html`                            | `<base>/`                           |
//! | Book index  | `<out>/essential/<book>/index.html`           | `<base>/essential/<book>/`          |
//! | Chapter     | `<out>/essential/<book>/<chapter>/index.html` | `<base>/essential/<book>/<chapter>/` |
//! | Article     | `<out>/essential/<book>/<chapter>/<art>.html` | `<base>/essential/<book>/<chapter>/<art>` |
//!
//! Every function here is pure: no I/O, output depends only on entity slugs.

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::types::{Article, Book, Chapter};

/// Subdirectory (and URL segment) under which all books live.
pub const BOOKS_DIR: &str = "essential";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    output_dir: PathBuf,
    base_url: String,
}

impl SiteLayout {
    pub fn new(output_dir: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.output_dir, &config.base_url)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // -- top level ----------------------------------------------------------

    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join("index.html")
    }

    pub fn index_grid_path(&self) -> PathBuf {
        self.output_dir.join("index-grid.html")
    }

    pub fn about_path(&self) -> PathBuf {
        self.output_dir.join("about.html")
    }

    pub fn feedback_path(&self) -> PathBuf {
        self.output_dir.join("feedback.html")
    }

    pub fn sitemap_path(&self) -> PathBuf {
        self.output_dir.join("sitemap.xml")
    }

    // -- books --------------------------------------------------------------

    pub fn book_dir(&self, book: &Book) -> PathBuf {
        self.output_dir.join(BOOKS_DIR).join(&book.slug.0)
    }

    pub fn book_index_path(&self, book: &Book) -> PathBuf {
        self.book_dir(book).join("index.html")
    }

    pub fn book_url(&self, book: &Book) -> String {
        format!("{}/{}/{}/", self.base_url, BOOKS_DIR, book.slug)
    }

    // -- chapters -----------------------------------------------------------

    pub fn chapter_dir(&self, book: &Book, chapter: &Chapter) -> PathBuf {
        self.book_dir(book).join(&chapter.slug.0)
    }

    pub fn chapter_path(&self, book: &Book, chapter: &Chapter) -> PathBuf {
        self.chapter_dir(book, chapter).join("index.html")
    }

    pub fn chapter_url(&self, book: &Book, chapter: &Chapter) -> String {
        format!("{}{}/", self.book_url(book), chapter.slug)
    }

    /// Destination of a chapter image; only the source's file name is kept.
    pub fn chapter_image_path(&self, book: &Book, chapter: &Chapter, image: &Path) -> PathBuf {
        let name = image.file_name().unwrap_or(image.as_os_str());
        self.chapter_dir(book, chapter).join(name)
    }

    // -- articles -----------------------------------------------------------

    pub fn article_path(&self, book: &Book, chapter: &Chapter, article: &Article) -> PathBuf {
        self.chapter_dir(book, chapter)
            .join(format!("{}.html", article.slug))
    }

    pub fn article_url(&self, book: &Book, chapter: &Chapter, article: &Article) -> String {
        format!("{}{}", self.chapter_url(book, chapter), article.slug)
    }
}
