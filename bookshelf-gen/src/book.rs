//! Book generation orchestrator.
//!
//! ## Chapter fan-out
//!
//! For N chapters and limit K, chapter `i` is launched only after one of K
//! permits is acquired; the permit travels into the blocking task and is
//! released when that chapter finishes. After all N launches the orchestrator
//! joins every task, so no chapter outlives [`Generator::gen_book`].
//!
//! Failures never short-circuit the join: every chapter result is collected
//! and reported together as [`GenError::ChapterFailures`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use bookshelf_core::Book;

use crate::error::{join_err, GenError};
use crate::pages::Generator;

/// Summary of one generated book.
#[derive(Debug, Clone, Serialize)]
pub struct BookReport {
    pub title: String,
    pub slug: String,
    pub chapters: usize,
    pub articles: usize,
    pub elapsed: Duration,
}

impl Generator {
    /// Generate one book: search index, book dir, book index page, then every
    /// chapter with at most [`Generator::concurrency`] in flight.
    pub async fn gen_book(&self, book: Arc<Book>) -> Result<BookReport, GenError> {
        let started = Instant::now();

        {
            let gen = self.clone();
            let book = Arc::clone(&book);
            blocking(move || gen.gen_book_prelude(&book)).await?;
        }

        self.gen_chapters(&book).await?;

        let report = BookReport {
            title: book.title.clone(),
            slug: book.slug.to_string(),
            chapters: book.chapters.len(),
            articles: book.article_count(),
            elapsed: started.elapsed(),
        };
        tracing::info!(
            chapters = report.chapters,
            articles = report.articles,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "generated book '{}'",
            report.title
        );
        Ok(report)
    }

    async fn gen_chapters(&self, book: &Arc<Book>) -> Result<(), GenError> {
        let limiter = Arc::new(Semaphore::new(self.concurrency()));
        let mut tasks: JoinSet<Result<(), GenError>> = JoinSet::new();
        let mut failures = Vec::new();

        for idx in 0..book.chapters.len() {
            let permit = match Arc::clone(&limiter).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    failures.push(GenError::LimiterClosed);
                    break;
                }
            };
            let gen = self.clone();
            let book = Arc::clone(book);
            tasks.spawn_blocking(move || {
                let _permit = permit;
                gen.gen_chapter(&book, idx, idx + 1).map(|_| ())
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => failures.push(err),
                Err(err) => failures.push(join_err(err)),
            }
        }

        if failures.is_empty() {
            return Ok(());
        }
        for err in &failures {
            tracing::error!(book = %book.slug, error = %err, "chapter failed");
        }
        Err(GenError::ChapterFailures {
            book: book.slug.to_string(),
            failures,
        })
    }
}

/// Run synchronous render work off the async worker threads.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, GenError>
where
    F: FnOnce() -> Result<T, GenError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(join_err)?
}
