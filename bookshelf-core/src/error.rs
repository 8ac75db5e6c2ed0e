//! Error types for bookshelf-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading the book library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with file path and line context from serde_yaml.
    #[error("failed to parse book at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A content directory or book file does not exist.
    #[error("not found at {path}")]
    NotFound { path: PathBuf },

    /// A slug that cannot be used as a path segment.
    #[error("invalid slug '{slug}' in {path}")]
    InvalidSlug { path: PathBuf, slug: String },

    /// Two siblings share a slug, so their output paths would collide.
    #[error("duplicate slug '{slug}' in {path}")]
    DuplicateSlug { path: PathBuf, slug: String },

    /// Two outputs of one chapter (chapter page, article pages, copied
    /// images) would be written to the same file.
    #[error("chapter '{chapter}' in {path} writes '{file}' more than once")]
    OutputCollision {
        path: PathBuf,
        chapter: String,
        file: String,
    },

    /// A chapter references an image that is not on disk.
    #[error("image {image} referenced by {path} does not exist")]
    MissingImage { path: PathBuf, image: PathBuf },
}

/// Errors from loading `bookshelf.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config not found at {path}")]
    NotFound { path: PathBuf },

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LibraryError {
    LibraryError::Io {
        path: path.into(),
        source,
    }
}
