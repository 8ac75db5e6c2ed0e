//! Render sink: template execution, optional minification, file write.
//!
//! ## `render` protocol
//!
//! 1. Resolve the template; a disabled kind returns [`RenderOutcome::Skipped`].
//! 2. Execute it against the binding into memory.
//! 3. Minify if enabled; on failure keep the raw bytes and count nothing.
//! 4. Write to `<path>.bookshelf.tmp`, then rename onto the final path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use bookshelf_renderer::{PageKind, TemplateCache};

use crate::error::{io_err, GenError};
use crate::minify::{Minifier, CONTENT_TYPE_HTML};
use crate::stats::RenderStats;

// ---------------------------------------------------------------------------
// Render outcome
// ---------------------------------------------------------------------------

/// Outcome of an individual page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Page was written.
    Written { path: PathBuf, bytes: usize },
    /// Template is disabled; nothing was written.
    Skipped { kind: PageKind },
}

impl RenderOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, RenderOutcome::Written { .. })
    }
}

// ---------------------------------------------------------------------------
// RenderSink
// ---------------------------------------------------------------------------

/// Executes templates and writes pages, accumulating [`RenderStats`].
pub struct RenderSink {
    templates: Arc<TemplateCache>,
    stats: Arc<RenderStats>,
    minifier: Option<Arc<dyn Minifier>>,
}

impl RenderSink {
    /// A sink that writes raw template output.
    pub fn new(templates: Arc<TemplateCache>, stats: Arc<RenderStats>) -> Self {
        RenderSink {
            templates,
            stats,
            minifier: None,
        }
    }

    /// Enable minification through `minifier`.
    pub fn with_minifier(mut self, minifier: Arc<dyn Minifier>) -> Self {
        self.minifier = Some(minifier);
        self
    }

    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Render `kind` with `data` into `dest`.
    pub fn render<T: Serialize>(
        &self,
        kind: PageKind,
        data: &T,
        dest: &Path,
    ) -> Result<RenderOutcome, GenError> {
        let Some(template) = self.templates.get(kind)? else {
            return Ok(RenderOutcome::Skipped { kind });
        };

        let html = template.render(data)?.into_bytes();
        let bytes = self.maybe_minify(kind, html);

        write_page(dest, &bytes)?;
        self.stats.record_page();
        tracing::debug!(template = %kind, bytes = bytes.len(), "wrote: {}", dest.display());
        Ok(RenderOutcome::Written {
            path: dest.to_path_buf(),
            bytes: bytes.len(),
        })
    }

    /// Render by template file name. Names outside the known set fail before
    /// anything is written.
    pub fn render_named<T: Serialize>(
        &self,
        name: &str,
        data: &T,
        dest: &Path,
    ) -> Result<RenderOutcome, GenError> {
        let kind: PageKind = name.parse()?;
        self.render(kind, data, dest)
    }

    fn maybe_minify(&self, kind: PageKind, html: Vec<u8>) -> Vec<u8> {
        let Some(minifier) = &self.minifier else {
            return html;
        };
        match minifier.minify(CONTENT_TYPE_HTML, &html) {
            Ok(minified) => {
                self.stats.record_minified(html.len(), minified.len());
                minified
            }
            Err(err) => {
                tracing::warn!(template = %kind, error = %err, "minify failed, keeping raw html");
                html
            }
        }
    }
}

fn write_page(path: &Path, content: &[u8]) -> Result<(), GenError> {
    let tmp = PathBuf::from(format!("{}.bookshelf.tmp", path.display()));
    write_page_with_tmp(path, content, &tmp)
}

fn write_page_with_tmp(path: &Path, content: &[u8], tmp: &Path) -> Result<(), GenError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minify::{HtmlMinifier, MinifyError};
    use bookshelf_renderer::RenderError;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const PAGE: &str = "<div>\n    <p>{{ title }}</p>\n</div>";

    struct FailingMinifier;

    impl Minifier for FailingMinifier {
        fn minify(&self, _: &str, _: &[u8]) -> Result<Vec<u8>, MinifyError> {
            Err(MinifyError::Failed("always".to_string()))
        }
    }

    fn setup(kind: PageKind, source: &str) -> (TempDir, Arc<TemplateCache>, Arc<RenderStats>) {
        let tmp = TempDir::new().unwrap();
        let tmpl = tmp.path().join("tmpl");
        fs::create_dir_all(&tmpl).unwrap();
        fs::write(tmpl.join(kind.file_name()), source).unwrap();
        let cache = Arc::new(TemplateCache::new(tmpl));
        (tmp, cache, Arc::new(RenderStats::new()))
    }

    #[test]
    fn minify_off_writes_raw_output() {
        let (tmp, cache, stats) = setup(PageKind::About, PAGE);
        let sink = RenderSink::new(cache, Arc::clone(&stats));
        let dest = tmp.path().join("www").join("about.html");

        let outcome = sink.render(PageKind::About, &json!({"title": "Hi"}), &dest).unwrap();
        assert!(outcome.is_written());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "<div>\n    <p>Hi</p>\n</div>");
        let snap = stats.snapshot();
        assert_eq!((snap.html_bytes, snap.minified_bytes, snap.pages_written), (0, 0, 1));
    }

    #[test]
    fn failing_minifier_falls_back_without_counting() {
        let (tmp, cache, stats) = setup(PageKind::About, PAGE);
        let sink = RenderSink::new(cache, Arc::clone(&stats)).with_minifier(Arc::new(FailingMinifier));
        let dest = tmp.path().join("about.html");

        sink.render(PageKind::About, &json!({"title": "Hi"}), &dest).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "<div>\n    <p>Hi</p>\n</div>");
        assert_eq!(stats.snapshot().minified_bytes, 0);
        assert_eq!(stats.snapshot().html_bytes, 0);
    }

    #[test]
    fn successful_minify_counts_both_sizes() {
        let (tmp, cache, stats) = setup(PageKind::About, PAGE);
        let sink = RenderSink::new(cache, Arc::clone(&stats)).with_minifier(Arc::new(HtmlMinifier::new()));
        let dest = tmp.path().join("about.html");

        let outcome = sink.render(PageKind::About, &json!({"title": "Hi"}), &dest).unwrap();
        let written = fs::read(&dest).unwrap();
        let snap = stats.snapshot();
        assert_eq!(snap.html_bytes, PAGE.len() as u64 - "{{ title }}".len() as u64 + 2);
        assert_eq!(snap.minified_bytes, written.len() as u64);
        assert!(snap.minified_bytes < snap.html_bytes);
        assert_eq!(outcome, RenderOutcome::Written { path: dest, bytes: written.len() });
    }

    #[test]
    fn disabled_template_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let cache = Arc::new(TemplateCache::new(tmp.path()).with_disabled([PageKind::Feedback]));
        let stats = Arc::new(RenderStats::new());
        let sink = RenderSink::new(cache, Arc::clone(&stats));
        let dest = tmp.path().join("feedback.html");

        let outcome = sink.render(PageKind::Feedback, &json!({}), &dest).unwrap();
        assert_eq!(outcome, RenderOutcome::Skipped { kind: PageKind::Feedback });
        assert!(!dest.exists());
        assert_eq!(stats.snapshot().pages_written, 0);
    }

    #[test]
    fn unknown_template_name_fails_without_output() {
        let (tmp, cache, stats) = setup(PageKind::About, PAGE);
        let sink = RenderSink::new(cache, stats);
        let dest = tmp.path().join("sidebar.html");

        let err = sink.render_named("sidebar.tmpl.html", &json!({}), &dest).unwrap_err();
        assert!(matches!(err, GenError::Render(RenderError::UnknownTemplate(_))), "got: {err}");
        assert!(!dest.exists());
    }

    #[test]
    fn execution_failure_fails_without_output() {
        let (tmp, cache, stats) = setup(PageKind::Article, "{{ article.title }}");
        let sink = RenderSink::new(cache, stats);
        let dest = tmp.path().join("a.html");

        let err = sink.render(PageKind::Article, &json!({}), &dest).unwrap_err();
        assert!(matches!(err, GenError::Render(RenderError::Execute { .. })), "got: {err}");
        assert!(!dest.exists());
    }

    #[test]
    fn existing_file_is_truncated_and_tmp_removed() {
        let (tmp, cache, stats) = setup(PageKind::About, "short");
        let sink = RenderSink::new(cache, stats);
        let dest = tmp.path().join("about.html");
        fs::write(&dest, "a much longer previous page").unwrap();

        sink.render(PageKind::About, &json!({}), &dest).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "short");
        let tmp_path = PathBuf::from(format!("{}.bookshelf.tmp", dest.display()));
        assert!(!tmp_path.exists(), ".bookshelf.tmp must be cleaned up");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();
        let path = readonly_dir.join("page.html");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("page.html.bookshelf.tmp");
        let result = write_page_with_tmp(&path, b"new", &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root ignores directory permissions; only assert when the rename failed.
        if result.is_err() {
            assert_eq!(fs::read_to_string(&path).unwrap(), "original");
            assert!(!tmp_path.exists(), ".bookshelf.tmp should be cleaned up");
        }
    }
}
