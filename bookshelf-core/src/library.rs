//! YAML book library.
//!
//! # Storage layout
//!
//! ```text
//! <content_dir>/
//!   010-go.yaml        (one file per book, loaded in file-name order)
//!   020-python.yaml
//!   go/img/maps.png    (images, relative to the book file's directory)
//! ```
//!
//! Loading validates everything the generator later relies on: slugs are
//! usable as path segments, siblings never share a slug (so output paths are
//! disjoint), and every referenced image exists.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{io_err, LibraryError};
use crate::types::{Book, Chapter, Slug};

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load a single book file, resolving image paths against its directory.
///
/// Returns `LibraryError::NotFound` if absent,
/// `LibraryError::Parse` (with path + line context) if malformed YAML.
pub fn load_book_at(path: &Path) -> Result<Book, LibraryError> {
    if !path.exists() {
        return Err(LibraryError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let mut book: Book = serde_yaml::from_str(&contents).map_err(|e| LibraryError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for chapter in &mut book.chapters {
        for image in &mut chapter.images {
            if image.is_relative() {
                *image = base.join(&*image);
            }
        }
    }

    validate(path, &book)?;
    Ok(book)
}

/// Load every `*.yaml` book under `content_dir`, sorted by file name.
pub fn load_books_at(content_dir: &Path) -> Result<Vec<Book>, LibraryError> {
    if !content_dir.is_dir() {
        return Err(LibraryError::NotFound {
            path: content_dir.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(content_dir)
        .map_err(|e| io_err(content_dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("yaml"))
        .collect();
    files.sort();

    let mut books = Vec::with_capacity(files.len());
    let mut seen = HashSet::new();
    for file in files {
        let book = load_book_at(&file)?;
        if !seen.insert(book.slug.clone()) {
            return Err(LibraryError::DuplicateSlug {
                path: file,
                slug: book.slug.0,
            });
        }
        books.push(book);
    }
    Ok(books)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check_slug(path: &Path, slug: &Slug, seen: &mut HashSet<Slug>) -> Result<(), LibraryError> {
    if !slug.is_valid() {
        return Err(LibraryError::InvalidSlug {
            path: path.to_path_buf(),
            slug: slug.0.clone(),
        });
    }
    if !seen.insert(slug.clone()) {
        return Err(LibraryError::DuplicateSlug {
            path: path.to_path_buf(),
            slug: slug.0.clone(),
        });
    }
    Ok(())
}

/// Every file a chapter writes lands in one directory: `index.html`, one
/// `<article>.html` per article and each image under its file name.
fn check_chapter_outputs(path: &Path, chapter: &Chapter) -> Result<(), LibraryError> {
    let articles = chapter.articles.iter().map(|a| format!("{}.html", a.slug));
    let images = chapter.images.iter().map(|i| {
        i.file_name()
            .unwrap_or(i.as_os_str())
            .to_string_lossy()
            .into_owned()
    });

    let mut files = HashSet::new();
    for file in std::iter::once("index.html".to_string())
        .chain(articles)
        .chain(images)
    {
        if !files.insert(file.clone()) {
            return Err(LibraryError::OutputCollision {
                path: path.to_path_buf(),
                chapter: chapter.slug.to_string(),
                file,
            });
        }
    }
    Ok(())
}

fn validate(path: &Path, book: &Book) -> Result<(), LibraryError> {
    check_slug(path, &book.slug, &mut HashSet::new())?;

    let mut chapter_slugs = HashSet::new();
    for chapter in &book.chapters {
        check_slug(path, &chapter.slug, &mut chapter_slugs)?;

        let mut article_slugs = HashSet::new();
        for article in &chapter.articles {
            check_slug(path, &article.slug, &mut article_slugs)?;
        }

        for image in &chapter.images {
            if !image.is_file() {
                return Err(LibraryError::MissingImage {
                    path: path.to_path_buf(),
                    image: image.clone(),
                });
            }
        }

        check_chapter_outputs(path, chapter)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
