//! Domain types for the book corpus.
//!
//! The hierarchy is a strict tree: a [`Book`] owns its [`Chapter`]s, a
//! [`Chapter`] owns its [`Article`]s and image references. Bodies are already
//! HTML; no markdown processing happens in this workspace.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// URL- and path-safe identity of a book, chapter or article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slug(pub String);

impl Slug {
    /// Non-empty, ASCII alphanumerics plus `-` and `_` only.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Slug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Slug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single article page inside a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub slug: Slug,
    pub title: String,
    /// Rendered HTML body.
    #[serde(default)]
    pub body: String,
}

/// A chapter: an ordered list of articles plus the images they reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub slug: Slug,
    pub title: String,
    /// Optional HTML introduction shown on the chapter page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Source image files, copied next to the chapter page on generation.
    #[serde(default)]
    pub images: Vec<PathBuf>,
}

/// A book: the unit of generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub slug: Slug,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Total number of articles across all chapters.
    pub fn article_count(&self) -> usize {
        self.chapters.iter().map(|c| c.articles.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
