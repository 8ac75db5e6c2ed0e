//! Per-book table-of-contents / search index.
//!
//! The standard builder writes `<book dir>/toc_search.json`, a flat array the
//! client-side search script loads:
//!
//! ```json
//! [
//!   {"title": "Maps", "url": ".../go/maps/", "parent": -1},
//!   {"title": "Iterate over keys", "url": ".../go/maps/iterate-keys", "parent": 0}
//! ]
//! ```
//!
//! `parent` is the index of the owning chapter entry, `-1` for chapters.

use serde::Serialize;

use bookshelf_core::{Book, SiteLayout};

use crate::error::{io_err, GenError};

pub const TOC_SEARCH_FILE: &str = "toc_search.json";

/// Builds the search artifact for one book. Runs before any chapter renders.
pub trait SearchIndexBuilder: Send + Sync {
    fn build(&self, book: &Book, layout: &SiteLayout) -> Result<(), GenError>;
}

#[derive(Debug, Serialize)]
struct TocItem<'a> {
    title: &'a str,
    url: String,
    parent: i64,
}

fn toc_items<'a>(book: &'a Book, layout: &SiteLayout) -> Vec<TocItem<'a>> {
    let mut items = Vec::with_capacity(book.chapters.len() + book.article_count());
    for chapter in &book.chapters {
        let parent = items.len() as i64;
        items.push(TocItem {
            title: &chapter.title,
            url: layout.chapter_url(book, chapter),
            parent: -1,
        });
        for article in &chapter.articles {
            items.push(TocItem {
                title: &article.title,
                url: layout.article_url(book, chapter, article),
                parent,
            });
        }
    }
    items
}

/// Writes [`TOC_SEARCH_FILE`] into the book directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct TocSearchIndex;

impl SearchIndexBuilder for TocSearchIndex {
    fn build(&self, book: &Book, layout: &SiteLayout) -> Result<(), GenError> {
        let dir = layout.book_dir(book);
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        let path = dir.join(TOC_SEARCH_FILE);
        let json = serde_json::to_string(&toc_items(book, layout))?;
        std::fs::write(&path, json).map_err(|e| io_err(&path, e))?;
        tracing::debug!("wrote: {}", path.display());
        Ok(())
    }
}
