//! Entity renderers: one method per page type, all sharing one [`RenderSink`].
//!
//! [`Generator`] is cheap to clone (an `Arc` inside) so chapter workers can
//! each hold a handle while the book orchestrator waits on them.

use std::sync::Arc;

use bookshelf_core::{Article, Book, Chapter, SiteConfig, SiteLayout};
use bookshelf_renderer::context::{
    ArticleContext, BookContext, ChapterContext, IndexContext, SiteChrome,
};
use bookshelf_renderer::{PageKind, TemplateCache};

use crate::copier::{FileCopier, FsCopier};
use crate::error::{io_err, GenError};
use crate::minify::{HtmlMinifier, Minifier};
use crate::search_index::{SearchIndexBuilder, TocSearchIndex};
use crate::sink::{RenderOutcome, RenderSink};
use crate::sitemap::SitemapCollector;
use crate::stats::RenderStats;

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// External seams the generator calls into.
#[derive(Clone)]
pub struct Collaborators {
    pub sitemap: Arc<dyn SitemapCollector>,
    pub search_index: Arc<dyn SearchIndexBuilder>,
    pub copier: Arc<dyn FileCopier>,
    /// Used only when minification is enabled in config.
    pub minifier: Arc<dyn Minifier>,
}

impl Collaborators {
    /// Filesystem copier, `toc_search.json` builder and `minify-html`.
    pub fn standard(sitemap: Arc<dyn SitemapCollector>) -> Self {
        Collaborators {
            sitemap,
            search_index: Arc::new(TocSearchIndex),
            copier: Arc::new(FsCopier),
            minifier: Arc::new(HtmlMinifier::new()),
        }
    }

    pub fn with_copier(mut self, copier: Arc<dyn FileCopier>) -> Self {
        self.copier = copier;
        self
    }

    pub fn with_search_index(mut self, search_index: Arc<dyn SearchIndexBuilder>) -> Self {
        self.search_index = search_index;
        self
    }

    pub fn with_minifier(mut self, minifier: Arc<dyn Minifier>) -> Self {
        self.minifier = minifier;
        self
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

pub(crate) struct Inner {
    pub(crate) layout: SiteLayout,
    pub(crate) chrome: SiteChrome,
    pub(crate) sink: RenderSink,
    pub(crate) concurrency: usize,
    pub(crate) sitemap: Arc<dyn SitemapCollector>,
    pub(crate) search_index: Arc<dyn SearchIndexBuilder>,
    pub(crate) copier: Arc<dyn FileCopier>,
}

/// Renders every page type of the site.
#[derive(Clone)]
pub struct Generator {
    pub(crate) inner: Arc<Inner>,
}

impl Generator {
    pub fn new(
        config: &SiteConfig,
        templates: Arc<TemplateCache>,
        stats: Arc<RenderStats>,
        collaborators: Collaborators,
    ) -> Self {
        let mut sink = RenderSink::new(templates, stats);
        if config.minify {
            sink = sink.with_minifier(collaborators.minifier);
        }
        Generator {
            inner: Arc::new(Inner {
                layout: SiteLayout::from_config(config),
                chrome: SiteChrome::from_config(config),
                sink,
                concurrency: config.effective_concurrency(),
                sitemap: collaborators.sitemap,
                search_index: collaborators.search_index,
                copier: collaborators.copier,
            }),
        }
    }

    /// Override the per-book chapter limit. Clamped to at least 1.
    pub fn with_concurrency(self, k: usize) -> Self {
        match Arc::try_unwrap(self.inner) {
            Ok(mut inner) => {
                inner.concurrency = k.max(1);
                Generator {
                    inner: Arc::new(inner),
                }
            }
            Err(inner) => {
                tracing::warn!("generator already shared, concurrency left unchanged");
                Generator { inner }
            }
        }
    }

    pub fn layout(&self) -> &SiteLayout {
        &self.inner.layout
    }

    pub fn sink(&self) -> &RenderSink {
        &self.inner.sink
    }

    pub fn concurrency(&self) -> usize {
        self.inner.concurrency
    }

    // -- top-level pages ----------------------------------------------------

    pub fn gen_index(&self, books: &[Arc<Book>]) -> Result<RenderOutcome, GenError> {
        let ctx = self.index_context(books);
        let outcome = self
            .inner
            .sink
            .render(PageKind::Index, &ctx, &self.inner.layout.index_path())?;
        log_top_level(PageKind::Index, &outcome);
        Ok(outcome)
    }

    pub fn gen_index_grid(&self, books: &[Arc<Book>]) -> Result<RenderOutcome, GenError> {
        let ctx = self.index_context(books);
        let outcome = self
            .inner
            .sink
            .render(PageKind::IndexGrid, &ctx, &self.inner.layout.index_grid_path())?;
        log_top_level(PageKind::IndexGrid, &outcome);
        Ok(outcome)
    }

    pub fn gen_about(&self) -> Result<RenderOutcome, GenError> {
        tracing::info!("writing about.html");
        let outcome = self
            .inner
            .sink
            .render(PageKind::About, &self.inner.chrome, &self.inner.layout.about_path())?;
        log_top_level(PageKind::About, &outcome);
        Ok(outcome)
    }

    pub fn gen_feedback(&self) -> Result<RenderOutcome, GenError> {
        tracing::info!("writing feedback.html");
        let outcome = self
            .inner
            .sink
            .render(
                PageKind::Feedback,
                &self.inner.chrome,
                &self.inner.layout.feedback_path(),
            )?;
        log_top_level(PageKind::Feedback, &outcome);
        Ok(outcome)
    }

    // -- entity pages -------------------------------------------------------

    /// `article_idx` indexes `chapter.articles`; `chapter_no` is 1-based.
    /// An index past the end is [`GenError::OutOfRange`].
    pub fn gen_article(
        &self,
        book: &Book,
        chapter: &Chapter,
        article_idx: usize,
        chapter_no: usize,
    ) -> Result<RenderOutcome, GenError> {
        let layout = &self.inner.layout;
        let article: &Article = chapter
            .articles
            .get(article_idx)
            .ok_or_else(|| GenError::OutOfRange {
                book: book.slug.to_string(),
                entity: "article",
                index: article_idx,
            })?;
        self.inner
            .sitemap
            .add_url(layout.article_url(book, chapter, article));

        let ctx = ArticleContext::new(
            layout,
            book,
            chapter,
            article_idx,
            chapter_no,
            &self.inner.chrome,
        );
        let outcome = self
            .inner
            .sink
            .render(PageKind::Article, &ctx, &layout.article_path(book, chapter, article))?;
        log_entity(PageKind::Article, &outcome);
        Ok(outcome)
    }

    /// Articles in order, then the chapter page, then the chapter's images.
    pub fn gen_chapter(
        &self,
        book: &Book,
        chapter_idx: usize,
        chapter_no: usize,
    ) -> Result<RenderOutcome, GenError> {
        let layout = &self.inner.layout;
        let chapter = book
            .chapters
            .get(chapter_idx)
            .ok_or_else(|| GenError::OutOfRange {
                book: book.slug.to_string(),
                entity: "chapter",
                index: chapter_idx,
            })?;
        self.inner.sitemap.add_url(layout.chapter_url(book, chapter));

        for idx in 0..chapter.articles.len() {
            self.gen_article(book, chapter, idx, chapter_no)?;
        }

        let ctx = ChapterContext::new(layout, book, chapter, chapter_no, &self.inner.chrome);
        let outcome = self
            .inner
            .sink
            .render(PageKind::Chapter, &ctx, &layout.chapter_path(book, chapter))?;
        log_entity(PageKind::Chapter, &outcome);

        for src in &chapter.images {
            let dst = layout.chapter_image_path(book, chapter, src);
            self.inner
                .copier
                .copy_file(&dst, src)
                .map_err(|source| GenError::Copy {
                    src: src.clone(),
                    dst: dst.clone(),
                    source,
                })?;
            tracing::debug!("copied: {}", dst.display());
        }
        Ok(outcome)
    }

    fn index_context<'a>(&'a self, books: &[Arc<Book>]) -> IndexContext<'a> {
        IndexContext::new(
            &self.inner.layout,
            books.iter().map(|b| b.as_ref()),
            &self.inner.chrome,
        )
    }

    /// Everything in a book except its chapters: search index, book dir,
    /// book index page, book URL.
    pub(crate) fn gen_book_prelude(&self, book: &Book) -> Result<(), GenError> {
        let layout = &self.inner.layout;
        self.inner
            .search_index
            .build(book, layout)
            .map_err(|source| GenError::SearchIndex {
                book: book.slug.to_string(),
                source: Box::new(source),
            })?;

        let dir = layout.book_dir(book);
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;

        let ctx = BookContext::new(layout, book, &self.inner.chrome);
        let outcome = self
            .inner
            .sink
            .render(PageKind::BookIndex, &ctx, &layout.book_index_path(book))?;
        log_entity(PageKind::BookIndex, &outcome);

        self.inner.sitemap.add_url(layout.book_url(book));
        Ok(())
    }
}

fn log_top_level(kind: PageKind, outcome: &RenderOutcome) {
    if let RenderOutcome::Skipped { .. } = outcome {
        tracing::info!(template = %kind, "template disabled, skipping");
    }
}

fn log_entity(kind: PageKind, outcome: &RenderOutcome) {
    if let RenderOutcome::Skipped { .. } = outcome {
        tracing::debug!(template = %kind, "template disabled, skipping");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
