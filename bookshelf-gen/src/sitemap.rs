//! Sitemap collection and `sitemap.xml` output.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url><loc>https://www.programming-books.io/essential/go/</loc><lastmod>2026-01-01</lastmod></url>
//! </urlset>
//! ```

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::error::{io_err, GenError};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Append-only sink for canonical URLs. Called from concurrent chapter renders.
pub trait SitemapCollector: Send + Sync {
    fn add_url(&self, url: String);
}

/// Mutex-guarded in-memory collector that can write itself as XML.
#[derive(Debug, Default)]
pub struct Sitemap {
    urls: Mutex<Vec<String>>,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of collected URLs, in insertion order.
    pub fn urls(&self) -> Vec<String> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as a sitemap document. URLs are sorted so output is stable
    /// regardless of chapter completion order.
    pub fn to_xml(&self, lastmod: &str) -> String {
        let mut urls = self.urls();
        urls.sort();
        urls.dedup();

        let mut xml = String::with_capacity(64 + urls.len() * 96);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!("<urlset xmlns=\"{SITEMAP_NS}\">\n"));
        for url in &urls {
            xml.push_str(&format!(
                "  <url><loc>{}</loc><lastmod>{}</lastmod></url>\n",
                escape_xml(url),
                escape_xml(lastmod)
            ));
        }
        xml.push_str("</urlset>\n");
        xml
    }

    /// Write `sitemap.xml` stamped with today's date.
    pub fn write_at(&self, path: &Path) -> Result<(), GenError> {
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        std::fs::write(path, self.to_xml(&today)).map_err(|e| io_err(path, e))?;
        tracing::info!(urls = self.len(), "wrote: {}", path.display());
        Ok(())
    }
}

impl SitemapCollector for Sitemap {
    fn add_url(&self, url: String) {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
