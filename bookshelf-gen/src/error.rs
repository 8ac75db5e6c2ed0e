//! Error types for bookshelf-gen.

use std::path::PathBuf;

use thiserror::Error;

use bookshelf_core::LibraryError;
use bookshelf_renderer::RenderError;

/// All errors that can arise while generating the site.
///
/// Every variant is fatal to a run: the pipeline stops at the first failing
/// book and no partial site is reported as success.
#[derive(Debug, Error)]
pub enum GenError {
    /// Template resolution or execution failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The book library could not be loaded.
    #[error("library error: {0}")]
    Library(#[from] LibraryError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying a chapter image failed.
    #[error("failed to copy {src} to {dst}: {source}")]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (search index).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The table-of-contents/search index for a book could not be built.
    #[error("search index for '{book}' failed: {source}")]
    SearchIndex {
        book: String,
        #[source]
        source: Box<GenError>,
    },

    /// A chapter or article index outside the book passed to a renderer.
    #[error("book '{book}' has no {entity} at index {index}")]
    OutOfRange {
        book: String,
        entity: &'static str,
        index: usize,
    },

    /// A blocking render task panicked or was cancelled.
    #[error("render task failed: {0}")]
    Join(String),

    /// The chapter limiter was closed while chapters were still pending.
    #[error("chapter limiter closed")]
    LimiterClosed,

    /// One or more chapters of a book failed; every failure is kept.
    #[error("{} chapter(s) of book '{book}' failed; first: {}", .failures.len(), first_failure(.failures))]
    ChapterFailures { book: String, failures: Vec<GenError> },
}

fn first_failure(failures: &[GenError]) -> String {
    failures
        .first()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

/// Convenience constructor for [`GenError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenError {
    GenError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn join_err(err: tokio::task::JoinError) -> GenError {
    GenError::Join(err.to_string())
}
