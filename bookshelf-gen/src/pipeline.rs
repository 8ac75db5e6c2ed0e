//! Whole-site generation entrypoint used by the CLI.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bookshelf_core::{library, Book, SiteConfig, SiteLayout};
use bookshelf_renderer::TemplateCache;

use crate::book::{blocking, BookReport};
use crate::error::{io_err, GenError};
use crate::pages::{Collaborators, Generator};
use crate::sitemap::Sitemap;
use crate::stats::{RenderStats, StatsSnapshot};

/// Result of a full site build.
#[derive(Debug, Clone)]
pub struct SiteReport {
    pub books: Vec<BookReport>,
    pub stats: StatsSnapshot,
    pub sitemap_urls: usize,
    pub elapsed: Duration,
}

/// What `check` found without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckReport {
    pub books: usize,
    pub chapters: usize,
    pub articles: usize,
    pub templates: usize,
}

/// Load the library from `config.content_dir` and generate the site.
pub async fn run(config: &SiteConfig) -> Result<SiteReport, GenError> {
    let content_dir = config.content_dir.clone();
    let books = blocking(move || Ok(library::load_books_at(&content_dir)?)).await?;
    generate(config, books).await
}

/// Generate the site for an already loaded library.
///
/// Top-level pages first, then books one at a time, then `sitemap.xml`.
/// The first failing book aborts the run.
pub async fn generate(config: &SiteConfig, books: Vec<Book>) -> Result<SiteReport, GenError> {
    let started = Instant::now();
    let layout = SiteLayout::from_config(config);
    let out = layout.output_dir().to_path_buf();
    std::fs::create_dir_all(&out).map_err(|e| io_err(&out, e))?;

    let templates = Arc::new(TemplateCache::from_config(config)?);
    let loaded = templates.preload_all()?;
    tracing::debug!(templates = loaded, "templates preloaded");

    let sitemap = Arc::new(Sitemap::new());
    let stats = Arc::new(RenderStats::new());
    let gen = Generator::new(
        config,
        templates,
        Arc::clone(&stats),
        Collaborators::standard(sitemap.clone()),
    );
    tracing::info!(
        books = books.len(),
        concurrency = gen.concurrency(),
        minify = config.minify,
        "generating site into {}",
        out.display()
    );

    let books: Vec<Arc<Book>> = books.into_iter().map(Arc::new).collect();
    {
        let gen = gen.clone();
        let books = books.clone();
        blocking(move || {
            gen.gen_index(&books)?;
            gen.gen_index_grid(&books)?;
            gen.gen_about()?;
            gen.gen_feedback()?;
            Ok(())
        })
        .await?;
    }

    let mut reports = Vec::with_capacity(books.len());
    for book in &books {
        reports.push(gen.gen_book(Arc::clone(book)).await?);
    }

    {
        let sitemap = Arc::clone(&sitemap);
        let path = layout.sitemap_path();
        blocking(move || sitemap.write_at(&path)).await?;
    }

    Ok(SiteReport {
        books: reports,
        stats: stats.snapshot(),
        sitemap_urls: sitemap.len(),
        elapsed: started.elapsed(),
    })
}

/// Load the library and parse every enabled template. Writes nothing.
pub fn check(config: &SiteConfig) -> Result<CheckReport, GenError> {
    let books = library::load_books_at(&config.content_dir)?;
    let templates = TemplateCache::from_config(config)?.preload_all()?;
    Ok(CheckReport {
        books: books.len(),
        chapters: books.iter().map(|b| b.chapters.len()).sum(),
        articles: books.iter().map(Book::article_count).sum(),
        templates,
    })
}
